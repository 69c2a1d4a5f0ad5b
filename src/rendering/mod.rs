//! Output rendering - from scan reports to terminal text.
//!
//! Results are grouped under a per-file heading. Color applies to
//! headings and the stats line only.

mod colors;
mod results;

pub use colors::Colorizer;
pub use results::ResultRenderer;
