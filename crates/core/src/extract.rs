//! Final-answer extraction for crew output.
//!
//! The agent runtime's trace output may be concatenated with the actual
//! answer, so the web UI keeps only what follows the last "Final Answer:"
//! marker. This is a best-effort heuristic, not a guaranteed-correct parse.

const FINAL_ANSWER_MARKER: &str = "final answer:";

/// Extract the answer text from a raw crew response.
///
/// Locates the last case-insensitive occurrence of `"final answer:"` and
/// keeps only the trailing text, trimmed and with any leading run of `#`,
/// `-`, and space characters removed. Input without the marker is returned
/// trimmed but otherwise unmodified.
pub fn extract_final_answer(text: &str) -> String {
    let trimmed = text.trim();

    // The marker is ASCII, so ascii-lowercasing preserves byte offsets.
    let lowered = trimmed.to_ascii_lowercase();
    match lowered.rfind(FINAL_ANSWER_MARKER) {
        Some(index) => trimmed[index + FINAL_ANSWER_MARKER.len()..]
            .trim()
            .trim_start_matches(['#', '-', ' '])
            .to_string(),
        None => trimmed.to_string(),
    }
}
