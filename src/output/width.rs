use terminal_size::{terminal_size, Width};

/// Get the width for separators and other full-line decorations
/// - Detects terminal width
/// - Caps at 100 characters maximum
/// - Defaults to 80 if detection fails (e.g. output is piped)
pub fn get_line_width() -> usize {
    const MAX_WIDTH: usize = 100;
    const DEFAULT_WIDTH: usize = 80;
    const MARGIN: usize = 2;

    if let Some((Width(w), _)) = terminal_size() {
        std::cmp::min((w as usize).saturating_sub(MARGIN), MAX_WIDTH)
    } else {
        DEFAULT_WIDTH
    }
}

/// Shorten `text` to at most `max` characters, ending with `…` when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut short: String = text.chars().take(max - 1).collect();
    short.push('…');
    short
}

/// Width available for a name column after `reserved` characters of other columns
pub fn name_width(reserved: usize) -> usize {
    get_line_width().saturating_sub(reserved).max(12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_line_width_returns_reasonable_value() {
        let width = get_line_width();
        assert!(width <= 100);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short.txt", 20), "short.txt");
        assert_eq!(truncate("a-very-long-file-name.txt", 10), "a-very-lo…");
        assert_eq!(truncate("ünïcödé", 4), "ünï…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_name_width_has_floor() {
        assert!(name_width(1000) >= 12);
    }
}
