use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use kaggle_harvest::render::from_json;

use super::{print_written, report_writer};

/// Re-render a saved `<slug>_data.json` file
pub async fn render(
    input: PathBuf,
    output: Option<PathBuf>,
    template: Option<PathBuf>,
    no_csv: bool,
) -> Result<()> {
    let text = tokio::fs::read_to_string(&input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let result =
        from_json(&text).with_context(|| format!("Invalid scrape data in {}", input.display()))?;

    let output = output.unwrap_or_else(|| {
        input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });

    let writer = report_writer(&output, template.as_deref(), no_csv)?;
    let report = writer.write(&result)?;

    println!("Rendered {} ({})", result.competition.title, result.competition.id);
    println!(
        "  {} threads, {} posts, {} notebooks",
        result.discussion_threads.len(),
        result.post_count(),
        result.notebooks.len()
    );
    print_written(&report);

    Ok(())
}
