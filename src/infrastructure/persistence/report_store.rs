//! Markdown reports on disk and the index linking them.

use crate::config::AppConfig;
use crate::infrastructure::persistence::theme_evolution::THEME_EVOLUTION_FILE;
use crate::infrastructure::persistence::ticker_history::TICKER_HISTORY_FILE;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const INDEX_FILE: &str = "_index.md";
const REPORT_SUFFIX: &str = "_analysis.md";

pub struct ReportStore {
    reports_dir: PathBuf,
    data_dir: PathBuf,
}

impl ReportStore {
    pub fn new(reports_dir: PathBuf, data_dir: PathBuf) -> Self {
        Self {
            reports_dir,
            data_dir,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.reports_dir(), config.data_dir())
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.reports_dir, &self.data_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {:?}", dir))?;
        }
        Ok(())
    }

    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.reports_dir
            .join(format!("{}_live{}", date.format("%Y-%m-%d"), REPORT_SUFFIX))
    }

    /// Writes the report for `date`, overwriting an earlier one.
    pub fn write_report(&self, date: NaiveDate, content: &str) -> Result<PathBuf> {
        self.ensure_dirs()?;
        let path = self.report_path(date);
        fs::write(&path, content).with_context(|| format!("Failed to write report {:?}", path))?;
        info!("Saved report to {:?}", path);
        Ok(path)
    }

    /// Report file names, newest first.
    pub fn list_reports(&self) -> Result<Vec<String>> {
        if !self.reports_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.reports_dir)
            .with_context(|| format!("Failed to list reports in {:?}", self.reports_dir))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read report directory entry")?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let file_name = entry.file_name();
            match file_name.to_str() {
                Some(name) if name.ends_with(REPORT_SUFFIX) => names.push(name.to_string()),
                _ => {}
            }
        }

        // Names start with the ISO date.
        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Rewrites `_index.md` with a link to every report, labelled by its date,
    /// followed by the data files kept next to them.
    pub fn rebuild_index(&self) -> Result<PathBuf> {
        self.ensure_dirs()?;
        let reports = self.list_reports()?;

        let mut content = String::from("# Capital Rotation Reports\n\n");
        if reports.is_empty() {
            content.push_str("_No reports yet._\n");
        }
        for name in &reports {
            let stem = name.trim_end_matches(".md");
            let label = stem.split('_').next().unwrap_or(stem);
            content.push_str(&format!("- [[{}|{}]]\n", stem, label));
        }

        content.push_str("\n## Data Files\n\n");
        for file in [TICKER_HISTORY_FILE, THEME_EVOLUTION_FILE] {
            content.push_str(&format!("- `data/{}`\n", file));
        }

        let path = self.reports_dir.join(INDEX_FILE);
        fs::write(&path, content).with_context(|| format!("Failed to write index {:?}", path))?;
        info!("Indexed {} reports in {:?}", reports.len(), path);
        Ok(path)
    }
}
