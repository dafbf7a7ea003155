//! Small string helpers shared by the loader, replies and config parsing.

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();

    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Shortens `s` to at most `max` characters, marking the cut with `...`.
///
/// With `max < 3` the cut point is counted back from the end of the string,
/// so `truncate("Hello", 0)` is `"He..."`.
pub fn truncate(s: &str, max: usize) -> String {
    let len = s.chars().count();

    if len <= max {
        return s.to_owned();
    }

    let keep = if max >= 3 {
        max - 3
    } else {
        len.saturating_sub(3 - max)
    };

    s.chars().take(keep).chain("...".chars()).collect()
}

/// Trims `s` and collapses every whitespace run into one space.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
