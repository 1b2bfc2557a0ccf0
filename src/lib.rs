//! # Hashtag Harvest
//!
//! Collects `#hashtags` from word-processor documents (ODT by default, DOCX
//! optionally) scattered across a directory tree and writes them to a
//! two-column CSV report mapping each hashtag to the file it was found in.
//!
//! ## Pipeline
//!
//! ```text
//! ┌───────────┐   ┌──────────┐   ┌───────────┐   ┌─────────┐   ┌─────────┐
//! │ Discover  │──▶│ Document │──▶│  Extract  │──▶│ Hashtag │──▶│ Report  │
//! │ (walkdir) │   │  (load)  │   │  (text)   │   │ (regex) │   │  (csv)  │
//! └───────────┘   └──────────┘   └───────────┘   └─────────┘   └─────────┘
//! ```
//!
//! Everything runs sequentially. The first document that fails to load
//! aborts the run and no report is written.
//!
//! ## Quick Start
//!
//! ```bash
//! hashtags report ~/notes                 # writes ~/notes/hashtags.csv
//! hashtags report ~/notes --output /tmp --filename tags
//! hashtags collect ~/notes --with-origin
//! hashtags tags ~/notes/today.odt
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`document`] | Load ODT/DOCX containers into paragraphs |
//! | [`extract`] | Join paragraphs into plain text |
//! | [`hashtag`] | Scan text for hashtags |
//! | [`discover`] | Find documents under a root |
//! | [`harvest`] | Per-file aggregation and top-level report generation |
//! | [`report`] | Records and the CSV writer |
//! | [`config`] | TOML configuration |
//! | [`error`] | Error types |
//! | [`progress`] | Stderr progress reporting |

pub mod config;
pub mod discover;
pub mod document;
pub mod error;
pub mod extract;
pub mod harvest;
pub mod hashtag;
pub mod progress;
pub mod report;

pub use document::{Document, DocumentFormat};
pub use error::{DocumentLoadError, HarvestError, LoadFailure, OutputWriteError};
pub use harvest::{generate_report, harvest_folder, hashtags_in_folder, Harvest};
pub use hashtag::{extract_hashtags, hashtags_from_file};
pub use report::{HashtagRecord, Report};
