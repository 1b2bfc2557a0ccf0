//! Tree-wide hashtag harvesting.
//!
//! Discovery, then per-file Load → Extract → Scan, strictly in sequence. The
//! first document that fails to load aborts the whole harvest; nothing is
//! salvaged and no report is written.

use std::path::{Path, PathBuf};

use crate::config::{Config, ScanConfig};
use crate::discover;
use crate::error::HarvestError;
use crate::hashtag;
use crate::progress::{NoProgress, ProgressEvent, ProgressReporter};
use crate::report::{self, Report};

/// Hashtags of a folder, with or without the file each came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Harvest {
    Bare(Vec<String>),
    WithOrigin(Report),
}

impl Harvest {
    pub fn len(&self) -> usize {
        match self {
            Harvest::Bare(tags) => tags.len(),
            Harvest::WithOrigin(report) => report.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Harvest every matching document under `root` into a [`Report`].
pub fn harvest_folder(
    root: &Path,
    scan: &ScanConfig,
    progress: &dyn ProgressReporter,
) -> Result<Report, HarvestError> {
    progress.report(ProgressEvent::Discovering {
        root: root.to_path_buf(),
    });
    let paths = discover::list_documents(root, scan)?;
    let total = paths.len() as u64;

    let mut report = Report::new();
    for (i, path) in paths.iter().enumerate() {
        progress.report(ProgressEvent::Processing {
            n: i as u64 + 1,
            total,
            path: path.clone(),
        });
        let tags = hashtag::hashtags_from_file(path, scan.format)?;
        tracing::debug!(file = %path.display(), hashtags = tags.len(), "Scanned document");
        report.push_file(path, tags);
    }

    Ok(report)
}

/// Hashtags under `root`, tagged with their origin file when `with_origin` is set.
pub fn hashtags_in_folder(
    root: &Path,
    scan: &ScanConfig,
    with_origin: bool,
) -> Result<Harvest, HarvestError> {
    let report = harvest_folder(root, scan, &NoProgress)?;
    if with_origin {
        Ok(Harvest::WithOrigin(report))
    } else {
        Ok(Harvest::Bare(
            report.into_records().into_iter().map(|r| r.hashtag).collect(),
        ))
    }
}

/// Harvest `folder` and write `<dir>/<filename>.csv`.
///
/// `output_dir` falls back to `config.output.dir`, then to `folder` itself.
/// `filename` falls back to `config.output.filename`. Returns the written path.
pub fn generate_report(
    folder: &Path,
    output_dir: Option<&Path>,
    filename: Option<&str>,
    config: &Config,
    progress: &dyn ProgressReporter,
) -> Result<PathBuf, HarvestError> {
    let dir = output_dir
        .or(config.output.dir.as_deref())
        .unwrap_or(folder);
    let filename = filename.unwrap_or(config.output.filename.as_str());

    let report = harvest_folder(folder, &config.scan, progress)?;
    let path = report::write_csv(&report, dir, filename, config.output.line_terminator)?;

    progress.report(ProgressEvent::Written {
        path: path.clone(),
        records: report.len() as u64,
    });
    Ok(path)
}
