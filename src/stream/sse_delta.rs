//! Per-line decoding for `data:`-prefixed chat completion chunks.

use serde::Deserialize;

use super::LineOutcome;

/// One streamed chat completion chunk. Only the first choice's delta text
/// is of interest; everything else is ignored.
#[derive(Debug, Deserialize)]
struct ChatCompletionChunk {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
}

/// Decode one SSE line. Only `data:` lines carry payloads; the `[DONE]`
/// sentinel ends the stream. Unparseable payloads are logged and dropped
/// rather than aborting the stream.
pub(crate) fn decode_line(line: &str) -> LineOutcome {
    let Some(payload) = line.trim().strip_prefix("data:") else {
        return LineOutcome::Skip;
    };
    let payload = payload.trim();

    if payload == "[DONE]" {
        return LineOutcome::Done;
    }

    match serde_json::from_str::<ChatCompletionChunk>(payload) {
        Ok(chunk) => {
            let text = chunk
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content);
            match text {
                Some(text) if !text.is_empty() => LineOutcome::Fragment(text),
                _ => LineOutcome::Skip,
            }
        }
        Err(err) => {
            tracing::warn!(%err, payload, "skipping unparseable chat completion chunk");
            LineOutcome::Skip
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_delta() {
        let line = r#"data: {"choices":[{"delta":{"content":"Hello"}}]}"#;
        assert_eq!(decode_line(line), LineOutcome::Fragment("Hello".to_string()));
    }

    #[test]
    fn test_prefix_without_space() {
        let line = r#"data:{"choices":[{"delta":{"content":"x"}}]}"#;
        assert_eq!(decode_line(line), LineOutcome::Fragment("x".to_string()));
    }

    #[test]
    fn test_done_sentinel() {
        assert_eq!(decode_line("data: [DONE]"), LineOutcome::Done);
        assert_eq!(decode_line("data:[DONE]"), LineOutcome::Done);
    }

    #[test]
    fn test_non_data_lines_skipped() {
        assert_eq!(decode_line(""), LineOutcome::Skip);
        assert_eq!(decode_line(": keep-alive"), LineOutcome::Skip);
        assert_eq!(decode_line("event: message"), LineOutcome::Skip);
    }

    #[test]
    fn test_role_only_chunk_skipped() {
        // The first chunk of a stream usually carries the role and no text
        let line = r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#;
        assert_eq!(decode_line(line), LineOutcome::Skip);
    }

    #[test]
    fn test_empty_content_skipped() {
        let line = r#"data: {"choices":[{"delta":{"content":""}}]}"#;
        assert_eq!(decode_line(line), LineOutcome::Skip);
    }

    #[test]
    fn test_malformed_payload_skipped() {
        assert_eq!(decode_line("data: {not json"), LineOutcome::Skip);
    }

    #[test]
    fn test_empty_choices_skipped() {
        assert_eq!(decode_line(r#"data: {"choices":[]}"#), LineOutcome::Skip);
    }
}
