//! Hashtag records and the CSV report writer.
//!
//! The report is written once, after every file has been processed, to a
//! temporary file beside the target which is then renamed into place. A
//! failed write leaves no report behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::OutputWriteError;

/// Column names, in output order.
pub const HEADER: [&str; 2] = ["hashtag", "originfile"];

/// One hashtag occurrence and the document it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagRecord {
    pub hashtag: String,
    pub originfile: PathBuf,
}

/// Ordered hashtag records. Never sorted or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    records: Vec<HashtagRecord>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every hashtag found in `originfile`, keeping scan order.
    pub fn push_file(&mut self, originfile: &Path, hashtags: Vec<String>) {
        self.records
            .extend(hashtags.into_iter().map(|hashtag| HashtagRecord {
                hashtag,
                originfile: originfile.to_path_buf(),
            }));
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HashtagRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[HashtagRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<HashtagRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a HashtagRecord;
    type IntoIter = std::slice::Iter<'a, HashtagRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Row terminator for the CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineTerminator {
    #[default]
    Crlf,
    Lf,
}

impl LineTerminator {
    fn as_csv(self) -> csv::Terminator {
        match self {
            LineTerminator::Crlf => csv::Terminator::CRLF,
            LineTerminator::Lf => csv::Terminator::Any(b'\n'),
        }
    }
}

/// Path the report for `basename` lands at inside `dir`.
pub fn report_path(dir: &Path, basename: &str) -> PathBuf {
    dir.join(format!("{}.csv", basename))
}

/// Write `report` to `<dir>/<basename>.csv`, replacing any existing file.
pub fn write_csv(
    report: &Report,
    dir: &Path,
    basename: &str,
    terminator: LineTerminator,
) -> Result<PathBuf, OutputWriteError> {
    let target = report_path(dir, basename);
    let fail = |source: std::io::Error| OutputWriteError {
        path: target.clone(),
        source,
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(fail)?;
    write_rows(report, tmp.as_file_mut(), terminator).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;
    tmp.persist(&target).map_err(|e| fail(e.error))?;

    tracing::info!(path = %target.display(), records = report.len(), "Wrote hashtag report");
    Ok(target)
}

fn write_rows<W: Write>(
    report: &Report,
    out: W,
    terminator: LineTerminator,
) -> std::io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(terminator.as_csv())
        .from_writer(out);

    writer.write_record(HEADER)?;
    for record in report {
        let origin = record.originfile.to_string_lossy();
        writer.write_record([record.hashtag.as_bytes(), origin.as_bytes()])?;
    }
    writer.flush()
}
