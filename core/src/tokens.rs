//! Cheap token estimate used to gate prompt size.

/// Estimate how many tokens a model would see in `text`.
///
/// Every maximal run of ASCII letters and digits counts once, every other
/// non-whitespace character counts once on its own, and whitespace counts
/// nothing. This over-counts punctuation-heavy text relative to real
/// tokenizers, which is the safe direction for a budget check.
pub fn estimate_tokens(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if !in_word {
                count += 1;
                in_word = true;
            }
        } else if matches!(ch, ' ' | '\n' | '\r' | '\t') {
            in_word = false;
        } else {
            count += 1;
            in_word = false;
        }
    }

    count
}
