//! Storage layer for rendered reports

pub mod report;

pub use report::{ReportWriter, WrittenReport};
