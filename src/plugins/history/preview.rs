const MAX_PREVIEW_CHARS: usize = 48;

/// Single-line label for a history entry: first non-blank line of the input,
/// cut to `MAX_PREVIEW_CHARS` with a trailing ellipsis.
pub(crate) fn preview_line(source: &str) -> String {
    let first_line = source
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");
    if first_line.chars().count() <= MAX_PREVIEW_CHARS {
        return first_line.to_string();
    }
    first_line.chars().take(MAX_PREVIEW_CHARS).collect::<String>() + "…"
}
