//! Grouped rendering of scan results.
//!
//! ```text
//! lib/app/users.ex
//! 12:def get_user!(id), do: Repo.get!(User, id)
//! 22:Repo.update()
//!
//! lib/app/admin.ex
//! 4:Repo.delete(admin)
//! ```
//!
//! One heading per file with matches, files in scan order, a blank line
//! between groups. Result lines are never colored.

use std::time::Duration;

use super::colors::Colorizer;
use crate::scan::ScanReport;

/// Renders a [`ScanReport`] for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct ResultRenderer {
    color: bool,
}

impl ResultRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Render every file group. Empty when nothing matched.
    pub fn render(&self, report: &ScanReport) -> String {
        let mut output = String::new();

        for (i, file) in report.files.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.push_str(&self.heading(&file.rel_path));
            output.push('\n');
            for result in &file.results {
                output.push_str(&result.to_string());
                output.push('\n');
            }
        }

        output
    }

    /// One-line summary for `--stats`.
    pub fn render_stats(&self, report: &ScanReport, elapsed: Duration) -> String {
        let mut summary = format!(
            "{} files scanned, {} matched, {} results in {:.2?}",
            report.files_scanned,
            report.files.len(),
            report.result_count(),
            elapsed
        );
        if !report.failures.is_empty() {
            summary.push_str(&format!(", {} skipped", report.failures.len()));
        }

        if self.color {
            Colorizer::dim(&summary)
        } else {
            summary
        }
    }

    fn heading(&self, rel_path: &str) -> String {
        if self.color {
            Colorizer::file_path(rel_path)
        } else {
            rel_path.to_string()
        }
    }
}
