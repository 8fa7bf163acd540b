//! Bulk CSV ingestion.
//!
//! Rows are parsed one at a time into candidate movies. A bad row never
//! stops the batch; it becomes a [`LoadIssue`] in the [`LoadReport`] and
//! the loader moves on to the next line.

mod parse;
mod report;

pub(crate) use parse::parse_row;
pub use parse::COLUMNS;
pub use report::{LoadIssue, LoadReport};
