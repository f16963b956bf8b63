pub mod output_writer;
pub mod report;

pub use output_writer::{OutputWriter, WriteOutcome, WriteProgress};
pub use report::{ConversionReport, FileReport, FileStatus, ReportHeader};
