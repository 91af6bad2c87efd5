/// Collapse every whitespace run (including non-breaking spaces and embedded
/// line breaks) to a single space, then trim and strip outer quotes.
pub fn clean_str(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.starts_with('"') && collapsed.ends_with('"') && collapsed.len() >= 2 {
        collapsed[1..collapsed.len() - 1].trim().to_string()
    } else {
        collapsed
    }
}

/// Header text as compared against variant spellings.
pub fn normalize_header(raw: &str, fold_hyphens: bool) -> String {
    let s = raw.replace('\u{a0}', " ");
    let s = if fold_hyphens { s.replace('-', " ") } else { s };
    clean_str(&s)
}

/// Title case: upper-case every letter that follows a non-letter.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
