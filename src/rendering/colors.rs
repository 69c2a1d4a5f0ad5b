//! ANSI color helpers.
//!
//! Only file headings and summaries are styled. Result lines stay plain
//! so `<line>:<text>` can be piped into other tools unchanged.

use owo_colors::OwoColorize;

/// Styling for the few decorated pieces of output.
pub struct Colorizer;

impl Colorizer {
    /// Colorize a file path (bold blue for headers)
    pub fn file_path(s: &str) -> String {
        s.bright_blue().bold().to_string()
    }

    /// Dim text for secondary information (stats, failures)
    pub fn dim(s: &str) -> String {
        s.dimmed().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_wrap_text() {
        let heading = Colorizer::file_path("lib/app/users.ex");
        assert!(heading.contains("lib/app/users.ex"));
        assert!(heading.starts_with("\u{1b}["));

        let dim = Colorizer::dim("3 files");
        assert!(dim.contains("3 files"));
        assert_ne!(dim, "3 files");
    }
}
