/// Sanitize a name for safe filesystem usage: alphanumerics, spaces, and
/// hyphens pass through, everything else collapses to single underscores.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_underscore = false;

    for c in name.trim().chars() {
        let mapped = if c.is_alphanumeric() || c == ' ' || c == '-' {
            c
        } else {
            '_'
        };

        if mapped == '_' {
            if last_was_underscore {
                continue;
            }
            last_was_underscore = true;
        } else {
            last_was_underscore = false;
        }

        out.push(mapped);
    }

    out.trim_matches(|c: char| c == '_' || c.is_whitespace())
        .to_string()
}

/// Shorten text to a single-line preview for logging
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    let mut preview: String = flat.chars().take(max_chars).collect();

    if flat.chars().count() > max_chars {
        preview.push('…');
    }

    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("LinkedIn"), "LinkedIn");
        assert_eq!(sanitize_filename("Twitter(X)"), "Twitter_X");
        assert_eq!(sanitize_filename("test/file?name"), "test_file_name");
        assert_eq!(sanitize_filename("  spaced  "), "spaced");
        assert_eq!(sanitize_filename("../evil"), "evil");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("hello world", 5), "hello…");
        assert_eq!(preview("line\nbreak", 20), "line break");
    }
}
