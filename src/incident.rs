//! Incident record wire format and the Record Parser.
//!
//! The log store is plain text: four labeled lines per record, terminated by
//! a rule of 45 `=` characters. Labels, the leading `●` bullet, and the
//! full-width `：` colon are the historical on-disk format and must survive a
//! write/parse round trip byte-for-byte; the parser additionally accepts
//! half-width `:` colons in hand-edited records.

/// Record separator: exactly 45 `=` characters.
pub const RECORD_RULE: &str = "=============================================";

pub const TIME_LABEL: &str = "時間";
pub const PERSON_LABEL: &str = "回報人";
pub const ISSUE_LABEL: &str = "異常問題";
pub const ACTION_LABEL: &str = "處理方式";

/// One logged instance of a technician resolving (or attempting to resolve)
/// an issue. Append-only: once written, never edited or deleted by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRecord {
    pub timestamp: String,
    pub reporter_name: String,
    pub reporter_id: String,
    pub issue: String,
    pub action: String,
}

impl IncidentRecord {
    /// Render the fixed four-label block, rule included, trailing newline.
    pub fn to_block(&self) -> String {
        format!(
            "● {TIME_LABEL}：{}\n● {PERSON_LABEL}：{} ({})\n● {ISSUE_LABEL}：{}\n● {ACTION_LABEL}：{}\n{RECORD_RULE}\n",
            self.timestamp, self.reporter_name, self.reporter_id, self.issue, self.action
        )
    }
}

/// Split full log text into candidate record blocks on the 45-`=` rule.
///
/// Lazy and restartable; whitespace-only chunks are yielded as-is, filtering
/// is the caller's job.
pub fn split_blocks(log_text: &str) -> impl Iterator<Item = &str> {
    log_text.split(RECORD_RULE)
}

/// Fields extracted from one candidate block. Each is independently optional;
/// viewers that need the full record use [`ParsedBlock::into_record`], the
/// probability engine needs only `issue` and `action`.
#[derive(Debug, Default, Clone)]
pub struct ParsedBlock {
    pub timestamp: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_id: Option<String>,
    pub issue: Option<String>,
    pub action: Option<String>,
}

impl ParsedBlock {
    /// Promote to a full record; `None` when any field is missing.
    pub fn into_record(self) -> Option<IncidentRecord> {
        Some(IncidentRecord {
            timestamp: self.timestamp?,
            reporter_name: self.reporter_name?,
            reporter_id: self.reporter_id?,
            issue: self.issue?,
            action: self.action?,
        })
    }
}

/// Extract fields from one raw block via independent line-prefix matches.
pub fn parse_block(block: &str) -> ParsedBlock {
    let mut parsed = ParsedBlock::default();
    for line in block.lines() {
        let line = line.trim().trim_start_matches('●').trim_start();
        if let Some(value) = field_value(line, TIME_LABEL) {
            parsed.timestamp.get_or_insert(value);
        } else if let Some(value) = field_value(line, PERSON_LABEL) {
            let (name, id) = split_reporter(&value);
            parsed.reporter_name.get_or_insert(name);
            parsed.reporter_id.get_or_insert(id);
        } else if let Some(value) = field_value(line, ISSUE_LABEL) {
            parsed.issue.get_or_insert(value);
        } else if let Some(value) = field_value(line, ACTION_LABEL) {
            parsed.action.get_or_insert(value);
        }
    }
    parsed
}

/// Match `<label> [ws] <full- or half-width colon> value` and return the
/// trimmed value, everything after the colon to end of line.
fn field_value(line: &str, label: &str) -> Option<String> {
    let rest = line.strip_prefix(label)?.trim_start();
    let rest = rest
        .strip_prefix('：')
        .or_else(|| rest.strip_prefix(':'))?;
    Some(rest.trim().to_string())
}

/// Split a person field "name (id)" into its parts. Records without the
/// parenthesized ID (hand-edited history) keep the whole value as the name
/// and an empty ID.
fn split_reporter(value: &str) -> (String, String) {
    if let Some(open) = value.rfind('(') {
        if value.ends_with(')') {
            let name = value[..open].trim().to_string();
            let id = value[open + 1..value.len() - 1].trim().to_string();
            return (name, id);
        }
    }
    (value.trim().to_string(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> IncidentRecord {
        IncidentRecord {
            timestamp: "2024-03-15 08:30:00".to_string(),
            reporter_name: "王小明".to_string(),
            reporter_id: "A123".to_string(),
            issue: "馬達過熱".to_string(),
            action: "重啟馬達並檢查風扇".to_string(),
        }
    }

    #[test]
    fn block_round_trips_through_parser() {
        let record = sample_record();
        let parsed = parse_block(&record.to_block()).into_record().unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn rule_is_45_equals() {
        assert_eq!(RECORD_RULE.len(), 45);
        assert!(RECORD_RULE.chars().all(|c| c == '='));
    }

    #[test]
    fn accepts_half_width_colon() {
        let block = "● 時間: 2024-01-01 00:00:00\n● 回報人: Amy (B9)\n● 異常問題: Belt slip\n● 處理方式: Tightened belt\n";
        let record = parse_block(block).into_record().unwrap();
        assert_eq!(record.reporter_name, "Amy");
        assert_eq!(record.reporter_id, "B9");
        assert_eq!(record.action, "Tightened belt");
    }

    #[test]
    fn missing_field_yields_no_record() {
        let block = "● 時間：2024-01-01 00:00:00\n● 異常問題：Belt slip\n";
        let parsed = parse_block(block);
        assert!(parsed.issue.is_some());
        assert!(parsed.clone().into_record().is_none());
        assert_eq!(parsed.action, None);
    }

    #[test]
    fn reporter_without_id_keeps_full_name() {
        let block = "● 回報人：老師傅\n";
        let parsed = parse_block(block);
        assert_eq!(parsed.reporter_name.as_deref(), Some("老師傅"));
        assert_eq!(parsed.reporter_id.as_deref(), Some(""));
    }

    #[test]
    fn split_yields_one_chunk_per_record_plus_tail() {
        let log = format!("{}{}", sample_record().to_block(), sample_record().to_block());
        let chunks: Vec<&str> = split_blocks(&log).collect();
        // two records plus the trailing newline chunk
        assert_eq!(chunks.len(), 3);
        assert!(chunks[2].trim().is_empty());
    }
}
