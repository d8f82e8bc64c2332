pub mod render;
pub mod scrape;

pub use render::render;
pub use scrape::{scrape, ScrapeParams};

use anyhow::Result;
use std::path::Path;

use kaggle_harvest::storage::{ReportWriter, WrittenReport};

/// Build the report writer shared by `scrape` and `render`
fn report_writer(
    output: &Path,
    template: Option<&Path>,
    no_csv: bool,
) -> Result<ReportWriter<'static>> {
    let writer = match template {
        Some(template) => ReportWriter::with_template(output, template)?,
        None => ReportWriter::new(output)?,
    };
    Ok(writer.csv(!no_csv))
}

fn print_written(report: &WrittenReport) {
    println!("Files written:");
    for path in report.paths() {
        println!("  {}", path.display());
    }
}
