//! Prompt construction for AI-generated time summaries.
//!
//! The backend never interprets logged time itself; it renders the entries
//! into a compact natural-language prompt and forwards it to the hosted LLM
//! API. Keeping the rendering here makes the prompt testable without I/O.

use chrono::NaiveDate;

/// One logged entry, flattened with its resolved taxonomy names.
#[derive(Debug, Clone)]
pub struct SummaryEntry {
    pub entry_date: NaiveDate,
    pub area: String,
    pub field: String,
    pub activity: String,
    pub duration_hours: f64,
    pub description: Option<String>,
}

/// System instruction sent alongside every summary request.
pub const SYSTEM_PROMPT: &str = "You are a time-tracking assistant. Summarize the user's logged \
     time in two or three short paragraphs of plain prose. Mention the \
     areas where most time went, notable patterns, and total hours. Do \
     not invent entries that are not in the log.";

/// Render the user prompt for a summary request.
///
/// Entries are listed one per line in log order; the header carries the
/// requested date range and the precomputed total so the model does not
/// have to do arithmetic.
pub fn build_prompt(entries: &[SummaryEntry], from: NaiveDate, to: NaiveDate) -> String {
    let total: f64 = entries.iter().map(|e| e.duration_hours).sum();

    let mut prompt = format!(
        "Time log from {from} to {to} ({count} entries, {total:.2} hours total):\n",
        count = entries.len(),
    );

    for entry in entries {
        prompt.push_str(&format!(
            "- {date}: {hours:.2}h on {area} / {field} / {activity}",
            date = entry.entry_date,
            hours = entry.duration_hours,
            area = entry.area,
            field = entry.field,
            activity = entry.activity,
        ));
        if let Some(description) = entry.description.as_deref().filter(|d| !d.trim().is_empty()) {
            prompt.push_str(&format!(" ({})", description.trim()));
        }
        prompt.push('\n');
    }

    if entries.is_empty() {
        prompt.push_str("(no entries logged in this range)\n");
    }

    prompt.push_str("\nSummarize this time log.");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, hours: f64, description: Option<&str>) -> SummaryEntry {
        SummaryEntry {
            entry_date: date.parse().unwrap(),
            area: "Work".into(),
            field: "Engineering".into(),
            activity: "Code review".into(),
            duration_hours: hours,
            description: description.map(Into::into),
        }
    }

    #[test]
    fn header_carries_range_and_total() {
        let entries = vec![entry("2026-03-01", 1.5, None), entry("2026-03-02", 2.0, None)];
        let prompt = build_prompt(
            &entries,
            "2026-03-01".parse().unwrap(),
            "2026-03-07".parse().unwrap(),
        );
        assert!(prompt.starts_with("Time log from 2026-03-01 to 2026-03-07 (2 entries, 3.50 hours total):"));
    }

    #[test]
    fn entry_line_includes_taxonomy_path() {
        let prompt = build_prompt(
            &[entry("2026-03-01", 0.75, Some(" standup notes "))],
            "2026-03-01".parse().unwrap(),
            "2026-03-01".parse().unwrap(),
        );
        assert!(prompt.contains("- 2026-03-01: 0.75h on Work / Engineering / Code review (standup notes)"));
    }

    #[test]
    fn empty_log_is_stated() {
        let prompt = build_prompt(
            &[],
            "2026-03-01".parse().unwrap(),
            "2026-03-07".parse().unwrap(),
        );
        assert!(prompt.contains("(no entries logged in this range)"));
    }

    #[test]
    fn blank_description_omitted() {
        let prompt = build_prompt(
            &[entry("2026-03-01", 1.0, Some("   "))],
            "2026-03-01".parse().unwrap(),
            "2026-03-01".parse().unwrap(),
        );
        assert!(
            prompt.contains("Code review\n"),
            "blank descriptions must not render: {prompt}"
        );
    }
}
