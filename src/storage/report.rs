//! Report file output
//!
//! Writes `<slug>_data.json`, `<slug>_report.md`, `<slug>_notebooks.csv` and
//! `<slug>_threads.csv` into an output directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::ScrapeResult;
use crate::render::{self, MarkdownRenderer};
use crate::utils::file_stem;

/// Paths of the files written for one result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub json: PathBuf,
    pub markdown: PathBuf,
    pub notebooks_csv: Option<PathBuf>,
    pub threads_csv: Option<PathBuf>,
}

impl WrittenReport {
    /// All written paths in write order
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths = vec![self.json.as_path(), self.markdown.as_path()];
        paths.extend(self.notebooks_csv.as_deref());
        paths.extend(self.threads_csv.as_deref());
        paths
    }
}

/// Writes rendered reports to disk
pub struct ReportWriter<'a> {
    renderer: MarkdownRenderer<'a>,
    output_dir: PathBuf,
    write_csv: bool,
}

impl<'a> ReportWriter<'a> {
    /// Create a writer with the built-in Markdown template
    ///
    /// The output directory is created if missing.
    pub fn new(output_dir: &Path) -> Result<Self> {
        let renderer = MarkdownRenderer::new().context("Failed to load report template")?;
        Self::with_renderer(output_dir, renderer)
    }

    /// Create a writer with a custom Markdown template file
    pub fn with_template(output_dir: &Path, template_path: &Path) -> Result<Self> {
        let renderer = MarkdownRenderer::with_template(template_path).with_context(|| {
            format!("Failed to load report template: {}", template_path.display())
        })?;
        Self::with_renderer(output_dir, renderer)
    }

    fn with_renderer(output_dir: &Path, renderer: MarkdownRenderer<'a>) -> Result<Self> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;

        Ok(Self {
            renderer,
            output_dir: output_dir.to_path_buf(),
            write_csv: true,
        })
    }

    /// Enable or disable the CSV tables
    #[must_use]
    pub fn csv(mut self, enabled: bool) -> Self {
        self.write_csv = enabled;
        self
    }

    /// Get output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn path_for(&self, stem: &str, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{stem}_{suffix}"))
    }

    /// Render and write every output for `result`
    ///
    /// Everything is rendered before the first file is written, so a
    /// rendering failure leaves the directory untouched.
    pub fn write(&self, result: &ScrapeResult) -> Result<WrittenReport> {
        let stem = file_stem(&result.competition.id);

        let json = render::to_json(result).context("Failed to serialize result")?;
        let markdown = self
            .renderer
            .render(result)
            .context("Failed to render Markdown report")?;
        let tables = self
            .write_csv
            .then(|| (render::to_csv(result), render::threads_to_csv(result)));

        let report = WrittenReport {
            json: self.path_for(&stem, "data.json"),
            markdown: self.path_for(&stem, "report.md"),
            notebooks_csv: tables.as_ref().map(|_| self.path_for(&stem, "notebooks.csv")),
            threads_csv: tables.as_ref().map(|_| self.path_for(&stem, "threads.csv")),
        };

        write_file(&report.json, &json)?;
        write_file(&report.markdown, &markdown)?;
        if let (Some((notebooks, threads)), Some(notebooks_path), Some(threads_path)) =
            (&tables, &report.notebooks_csv, &report.threads_csv)
        {
            write_file(notebooks_path, notebooks)?;
            write_file(threads_path, threads)?;
        }

        tracing::info!(
            competition = %result.competition.id,
            dir = %self.output_dir.display(),
            files = report.paths().len(),
            "Wrote report files"
        );

        Ok(report)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "Saved file");
    Ok(())
}
