//! Per-line decoding for streamed JSON-array generate-content responses.

use serde::Deserialize;

use super::LineOutcome;

/// One streamed generation record. Only the first candidate's first text
/// part is of interest.
#[derive(Debug, Deserialize)]
struct GenerateContentRecord {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Decode one line of a streamed JSON array. The array brackets and
/// separators arrive as short lines of their own; a record line may carry a
/// single leading comma. There is no terminator sentinel in this format.
pub(crate) fn decode_line(line: &str) -> LineOutcome {
    let line = line.trim();
    if line.len() < 3 {
        return LineOutcome::Skip;
    }
    let record = line.strip_prefix(',').unwrap_or(line);

    match serde_json::from_str::<GenerateContentRecord>(record) {
        Ok(record) => {
            let text = record
                .candidates
                .into_iter()
                .next()
                .and_then(|candidate| candidate.content.parts.into_iter().next())
                .and_then(|part| part.text);
            match text {
                Some(text) if !text.is_empty() => LineOutcome::Fragment(text),
                _ => LineOutcome::Skip,
            }
        }
        Err(err) => {
            tracing::warn!(%err, record, "skipping unparseable generate-content record");
            LineOutcome::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> String {
        format!(r#"{{"candidates":[{{"content":{{"parts":[{{"text":"{text}"}}]}}}}]}}"#)
    }

    #[test]
    fn test_record_line() {
        assert_eq!(
            decode_line(&record("Hello")),
            LineOutcome::Fragment("Hello".to_string())
        );
    }

    #[test]
    fn test_leading_comma_stripped() {
        let line = format!(",{}", record("more"));
        assert_eq!(decode_line(&line), LineOutcome::Fragment("more".to_string()));
    }

    #[test]
    fn test_structural_lines_skipped() {
        assert_eq!(decode_line("["), LineOutcome::Skip);
        assert_eq!(decode_line("]"), LineOutcome::Skip);
        assert_eq!(decode_line(","), LineOutcome::Skip);
        assert_eq!(decode_line("  "), LineOutcome::Skip);
    }

    #[test]
    fn test_record_without_text_skipped() {
        let line = r#"{"candidates":[{"finishReason":"STOP"}]}"#;
        assert_eq!(decode_line(line), LineOutcome::Skip);
    }

    #[test]
    fn test_malformed_record_skipped() {
        assert_eq!(decode_line(r#"{"candidates": oops"#), LineOutcome::Skip);
    }

    #[test]
    fn test_no_candidates_skipped() {
        assert_eq!(decode_line(r#"{"candidates":[]}"#), LineOutcome::Skip);
    }
}
