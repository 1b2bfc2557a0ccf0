//! Word-processor document loading (ODT, DOCX).
//!
//! A document is a ZIP container holding one main XML part. Loading reads
//! that part (bounded), walks it once with `quick-xml`, and keeps the plain
//! text of every paragraph-level node in document order. Once [`Document::open`]
//! succeeds, paragraph enumeration cannot fail.

use std::borrow::Cow;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use serde::Deserialize;

use crate::error::{DocumentLoadError, LoadFailure};

/// Maximum decompressed bytes to read from the main XML entry (zip-bomb protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Supported document container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// OpenDocument Text: `content.xml`, paragraphs are `text:p`.
    #[default]
    Odt,
    /// Office Open XML word-processing: `word/document.xml`, paragraphs are `w:p`.
    Docx,
}

impl DocumentFormat {
    /// File-name suffix used for discovery when none is configured.
    pub fn default_extension(self) -> &'static str {
        match self {
            DocumentFormat::Odt => ".odt",
            DocumentFormat::Docx => ".docx",
        }
    }

    fn main_entry(self) -> &'static str {
        match self {
            DocumentFormat::Odt => "content.xml",
            DocumentFormat::Docx => "word/document.xml",
        }
    }

    fn dialect(self) -> &'static Dialect {
        match self {
            DocumentFormat::Odt => &ODT_DIALECT,
            DocumentFormat::Docx => &DOCX_DIALECT,
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "odt" => Ok(DocumentFormat::Odt),
            "docx" => Ok(DocumentFormat::Docx),
            other => Err(format!(
                "unknown document format '{}': expected odt or docx",
                other
            )),
        }
    }
}

/// Elements that carry paragraph structure in one format. Names are local
/// names and only match inside one of `namespaces`.
struct Dialect {
    namespaces: &'static [&'static [u8]],
    paragraph: &'static [u8],
    /// Elements whose character data counts as text. `None` means any
    /// character data inside a paragraph counts.
    text_run: Option<&'static [u8]>,
    /// Container outside of which tabs and breaks are layout, not text.
    inline_scope: Option<&'static [u8]>,
    tab: &'static [u8],
    line_breaks: &'static [&'static [u8]],
    /// Element expanding to a run of spaces, with its count attribute.
    spaces: Option<(&'static [u8], &'static [u8])>,
}

static ODT_DIALECT: Dialect = Dialect {
    namespaces: &[b"urn:oasis:names:tc:opendocument:xmlns:text:1.0"],
    paragraph: b"p",
    text_run: None,
    inline_scope: None,
    tab: b"tab",
    line_breaks: &[b"line-break"],
    spaces: Some((b"s", b"c")),
};

static DOCX_DIALECT: Dialect = Dialect {
    namespaces: &[
        b"http://schemas.openxmlformats.org/wordprocessingml/2006/main",
        b"http://purl.oclc.org/ooxml/wordprocessingml/main",
    ],
    paragraph: b"p",
    text_run: Some(b"t"),
    inline_scope: Some(b"r"),
    tab: b"tab",
    line_breaks: &[b"br", b"cr"],
    spaces: None,
};

/// A parsed document, owned by whoever loaded it.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    format: DocumentFormat,
    paragraphs: Vec<String>,
}

impl Document {
    /// Load the document at `path`, failing if it is missing, unreadable,
    /// or not a well-formed document of `format`.
    pub fn open(path: impl AsRef<Path>, format: DocumentFormat) -> Result<Self, DocumentLoadError> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).map_err(|e| DocumentLoadError::new(path, LoadFailure::Io(e)))?;
        Self::from_bytes(path, &bytes, format)
    }

    /// Parse an in-memory document. `path` is only used for identification.
    pub fn from_bytes(
        path: impl Into<PathBuf>,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<Self, DocumentLoadError> {
        let path = path.into();
        match parse_container(bytes, format) {
            Ok(paragraphs) => Ok(Self {
                path,
                format,
                paragraphs,
            }),
            Err(source) => Err(DocumentLoadError::new(path, source)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Plain text of every paragraph-level node, in document order.
    pub fn paragraphs(&self) -> impl ExactSizeIterator<Item = &str> {
        self.paragraphs.iter().map(String::as_str)
    }
}

fn parse_container(bytes: &[u8], format: DocumentFormat) -> Result<Vec<String>, LoadFailure> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))?;
    let xml = read_entry_bounded(&mut archive, format.main_entry(), MAX_XML_ENTRY_BYTES)?;
    collect_paragraphs(&xml, format.main_entry(), format.dialect())
}

fn read_entry_bounded(
    archive: &mut zip::ZipArchive<std::io::Cursor<&[u8]>>,
    name: &'static str,
    max_bytes: u64,
) -> Result<Vec<u8>, LoadFailure> {
    let entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Err(LoadFailure::MissingEntry(name)),
        Err(e) => return Err(e.into()),
    };
    let mut out = Vec::new();
    entry.take(max_bytes + 1).read_to_end(&mut out)?;
    if out.len() as u64 > max_bytes {
        return Err(LoadFailure::EntryTooLarge {
            entry: name,
            limit: max_bytes,
        });
    }
    Ok(out)
}

/// Walk the XML once. Nested paragraphs are recorded on their own and also
/// contribute their text to every enclosing paragraph.
fn collect_paragraphs(
    xml: &[u8],
    entry: &'static str,
    dialect: &Dialect,
) -> Result<Vec<String>, LoadFailure> {
    let xml_err = |message: String| LoadFailure::Xml { entry, message };

    let mut reader = quick_xml::NsReader::from_reader(xml);
    let mut buf = Vec::new();
    let mut paragraphs: Vec<String> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    let mut depth = 0usize;
    let mut run_depth = 0usize;
    let mut scope_depth = 0usize;

    loop {
        let (ns, event) = match reader.read_resolved_event_into(&mut buf) {
            Ok(resolved) => resolved,
            Err(e) => return Err(xml_err(e.to_string())),
        };
        let known = match ns {
            ResolveResult::Bound(Namespace(uri)) => dialect.namespaces.iter().any(|n| *n == uri),
            _ => false,
        };

        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }

        match event {
            // Foreign markup (DrawingML, OMML, ...) never carries paragraph structure.
            Event::Start(_) | Event::Empty(_) | Event::End(_) if !known => {}
            Event::Start(e) => {
                let name = e.local_name();
                if name.as_ref() == dialect.paragraph {
                    open.push(paragraphs.len());
                    paragraphs.push(String::new());
                } else if Some(name.as_ref()) == dialect.text_run {
                    run_depth += 1;
                } else if Some(name.as_ref()) == dialect.inline_scope {
                    scope_depth += 1;
                } else if in_scope(dialect, scope_depth) {
                    if let Some(piece) = inline_text(&e, dialect) {
                        append(&mut paragraphs, &open, &piece);
                    }
                }
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == dialect.paragraph {
                    paragraphs.push(String::new());
                } else if in_scope(dialect, scope_depth) {
                    if let Some(piece) = inline_text(&e, dialect) {
                        append(&mut paragraphs, &open, &piece);
                    }
                }
            }
            Event::End(e) => {
                let name = e.local_name();
                if name.as_ref() == dialect.paragraph {
                    open.pop();
                } else if Some(name.as_ref()) == dialect.text_run {
                    run_depth = run_depth.saturating_sub(1);
                } else if Some(name.as_ref()) == dialect.inline_scope {
                    scope_depth = scope_depth.saturating_sub(1);
                }
            }
            Event::Text(te) => {
                if counts_as_text(dialect, &open, run_depth) {
                    let text = te.unescape().map_err(|e| xml_err(e.to_string()))?;
                    append(&mut paragraphs, &open, &text);
                }
            }
            Event::CData(cd) => {
                if counts_as_text(dialect, &open, run_depth) {
                    let raw = cd.into_inner();
                    append(&mut paragraphs, &open, &String::from_utf8_lossy(&raw));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(xml_err(format!(
            "unexpected end of document with {} unclosed element(s)",
            depth
        )));
    }
    Ok(paragraphs)
}

fn counts_as_text(dialect: &Dialect, open: &[usize], run_depth: usize) -> bool {
    if open.is_empty() {
        return false;
    }
    dialect.text_run.is_none() || run_depth > 0
}

fn in_scope(dialect: &Dialect, scope_depth: usize) -> bool {
    dialect.inline_scope.is_none() || scope_depth > 0
}

/// Text produced by a formatting element such as a tab or line break.
fn inline_text(e: &BytesStart<'_>, dialect: &Dialect) -> Option<Cow<'static, str>> {
    let name = e.local_name();
    let name = name.as_ref();
    if name == dialect.tab {
        return Some(Cow::Borrowed("\t"));
    }
    if dialect.line_breaks.iter().any(|b| *b == name) {
        return Some(Cow::Borrowed("\n"));
    }
    if let Some((element, count_attr)) = dialect.spaces {
        if name == element {
            let count = e
                .attributes()
                .flatten()
                .find(|a| a.key.local_name().as_ref() == count_attr)
                .and_then(|a| std::str::from_utf8(&a.value).ok()?.trim().parse::<usize>().ok())
                .unwrap_or(1);
            return Some(Cow::Owned(" ".repeat(count)));
        }
    }
    None
}

fn append(paragraphs: &mut [String], open: &[usize], text: &str) {
    for &idx in open {
        paragraphs[idx].push_str(text);
    }
}
