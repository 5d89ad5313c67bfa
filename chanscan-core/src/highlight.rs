//! Keyword highlighting for report output.
//!
//! Matched keyword occurrences are wrapped in an inline styled span; the
//! rest of the text is HTML-escaped so message bodies cannot break the
//! rendered Markdown. Overlapping occurrences are resolved in a single
//! deterministic pass: earliest start wins, and among equal starts the
//! longest match wins, so the output never contains nested markup.

pub const HIGHLIGHT_OPEN: &str =
    "<span style=\"background-color: yellow; color: black; font-weight: bold;\">";
pub const HIGHLIGHT_CLOSE: &str = "</span>";

/// Wraps every case-insensitive occurrence of each matched keyword in a
/// highlight span, preserving the original casing of the matched text.
/// Returns the text unchanged when nothing matches.
pub fn highlight(text: &str, matched_keywords: &[&str]) -> String {
    let spans = match_spans(text, matched_keywords);
    if spans.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + spans.len() * HIGHLIGHT_OPEN.len());
    let mut cursor = 0;
    for &(start, end) in &spans {
        push_escaped(&mut out, &text[cursor..start]);
        out.push_str(HIGHLIGHT_OPEN);
        out.push_str(&text[start..end]);
        out.push_str(HIGHLIGHT_CLOSE);
        cursor = end;
    }
    push_escaped(&mut out, &text[cursor..]);
    out
}

/// Non-overlapping byte spans to wrap, left to right.
fn match_spans(text: &str, keywords: &[&str]) -> Vec<(usize, usize)> {
    let mut candidates: Vec<(usize, usize)> = keywords
        .iter()
        .flat_map(|keyword| occurrences(text, keyword))
        .collect();

    // Earliest start first; among equal starts, longest span first.
    candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut kept = Vec::new();
    let mut cursor = 0;
    for (start, end) in candidates {
        if start >= cursor {
            kept.push((start, end));
            cursor = end;
        }
    }
    kept
}

/// All case-insensitive occurrences of `keyword` in `text`, as byte spans
/// into the original (un-lowercased) text. The scan works on char
/// boundaries, so case folding that changes byte lengths cannot skew spans.
fn occurrences(text: &str, keyword: &str) -> Vec<(usize, usize)> {
    if keyword.is_empty() {
        return Vec::new();
    }
    let keyword_lower: Vec<char> = keyword.chars().flat_map(char::to_lowercase).collect();

    let mut spans = Vec::new();
    for (start, _) in text.char_indices() {
        if let Some(len) = match_len(&text[start..], &keyword_lower) {
            spans.push((start, start + len));
        }
    }
    spans
}

/// Byte length of a case-insensitive match of `keyword_lower` at the front
/// of `slice`, or `None`. The match must end on a char boundary of `slice`.
fn match_len(slice: &str, keyword_lower: &[char]) -> Option<usize> {
    let mut ki = 0;
    for (offset, ch) in slice.char_indices() {
        for lowered in ch.to_lowercase() {
            match keyword_lower.get(ki) {
                Some(&expected) if expected == lowered => ki += 1,
                _ => return None,
            }
        }
        if ki == keyword_lower.len() {
            return Some(offset + ch.len_utf8());
        }
    }
    None
}

fn push_escaped(out: &mut String, segment: &str) {
    for ch in segment.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
