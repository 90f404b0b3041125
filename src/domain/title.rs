const MAX_TITLE_CHARS: usize = 50;
const TRUNCATED_CHARS: usize = 47;

/// Derive a note title from a transcription: everything up to (not including)
/// the first sentence terminator, truncated to 47 characters plus `...` when
/// the first sentence runs longer than 50.
pub fn derive_title(transcription: &str) -> String {
    let first_sentence = transcription
        .split(['.', '!', '?'])
        .next()
        .unwrap_or("");

    if first_sentence.chars().count() > MAX_TITLE_CHARS {
        let truncated: String = first_sentence.chars().take(TRUNCATED_CHARS).collect();
        format!("{}...", truncated)
    } else {
        first_sentence.to_string()
    }
}
