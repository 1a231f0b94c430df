use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SyntaxHighlighter {
    /// Colors follow the terminal's capabilities unless `enabled` is false.
    pub fn new(enabled: bool) -> Self {
        let color_support = if enabled {
            check_color_support().unwrap_or(ColorSupport::NoColor)
        } else {
            ColorSupport::NoColor
        };
        Self { color_support }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colors the command word and any `-flag` arguments.
    ///
    /// Whitespace is copied through unchanged so the cursor stays aligned
    /// with what the user typed.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.is_enabled() {
            return input.to_string();
        }

        let mut result = String::with_capacity(input.len());
        let mut seen_command = false;
        for (is_word, segment) in segments(input) {
            if !is_word {
                result.push_str(segment);
            } else if !seen_command {
                seen_command = true;
                let command_style = Style::builder().foreground(Color::Cyan).bold().build();
                result.push_str(&segment.style(command_style).to_string());
            } else if segment.starts_with('-') {
                let flag_style = Style::builder().foreground(Color::Yellow).build();
                result.push_str(&segment.style(flag_style).to_string());
            } else {
                result.push_str(segment);
            }
        }
        result
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.is_enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_path(&self, path: &str) -> String {
        if !self.is_enabled() {
            return path.to_string();
        }

        let path_style = Style::builder().foreground(Color::Green).build();
        path.style(path_style).to_string()
    }
}

/// Splits `input` into alternating runs of whitespace and non-whitespace.
fn segments(input: &str) -> Vec<(bool, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (idx, c) in input.char_indices() {
        let is_word = !c.is_whitespace();
        match current {
            Some(kind) if kind != is_word => {
                out.push((kind, &input[start..idx]));
                start = idx;
                current = Some(is_word);
            }
            None => current = Some(is_word),
            _ => {}
        }
    }
    if let Some(kind) = current {
        out.push((kind, &input[start..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_highlighter_is_identity() {
        let highlighter = SyntaxHighlighter::plain();
        assert!(!highlighter.is_enabled());
        assert_eq!(highlighter.highlight_command("rm  -r dir"), "rm  -r dir");
        assert_eq!(highlighter.highlight_error("boom"), "boom");
        assert_eq!(highlighter.highlight_path("/tmp"), "/tmp");
    }

    #[test]
    fn test_segments_preserve_whitespace() {
        let parts = segments("  ls \t-a x");
        assert_eq!(
            parts,
            vec![
                (false, "  "),
                (true, "ls"),
                (false, " \t"),
                (true, "-a"),
                (false, " "),
                (true, "x"),
            ]
        );
        let joined: String = parts.iter().map(|(_, s)| *s).collect();
        assert_eq!(joined, "  ls \t-a x");
    }

    #[test]
    fn test_segments_of_empty_input() {
        assert!(segments("").is_empty());
    }
}
