//! End-to-end tests for the `hashtags` binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn hashtags_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("hashtags");
    path
}

fn odt_with_paragraphs(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<text:p>{}</text:p>", p))
        .collect();
    let xml = format!(
        "<office:document-content xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" xmlns:text=\"urn:oasis:names:tc:opendocument:xmlns:text:1.0\"><office:body><office:text>{}</office:text></office:body></office:document-content>",
        body
    );
    zip_single("content.xml", &xml)
}

fn docx_with_text(text: &str) -> Vec<u8> {
    let xml = format!(
        "<?xml version=\"1.0\"?><w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:body></w:document>",
        text
    );
    zip_single("word/document.xml", &xml)
}

fn zip_single(entry: &str, xml: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buf));
        zip.start_file(entry, zip::write::SimpleFileOptions::default())
            .unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buf
}

fn run(args: &[&str]) -> (String, String, bool) {
    let binary = hashtags_binary();
    let output = Command::new(&binary)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run hashtags binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn setup_notes() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let notes = tmp.path().join("notes");
    fs::create_dir_all(notes.join("2024")).unwrap();
    fs::write(
        notes.join("2024").join("jan.odt"),
        odt_with_paragraphs(&["Kickoff #planning", "Owner: #alice"]),
    )
    .unwrap();
    fs::write(notes.join("todo.txt"), "#ignored").unwrap();
    tmp
}

#[test]
fn report_writes_csv_into_scanned_folder() {
    let tmp = setup_notes();
    let notes = tmp.path().join("notes");

    let (stdout, stderr, ok) = run(&["--progress", "off", "report", arg(&notes)]);
    assert!(ok, "report failed: {}", stderr);

    let written = notes.join("hashtags.csv");
    assert_eq!(stdout.trim(), written.display().to_string());

    let doc = notes.join("2024").join("jan.odt");
    assert_eq!(
        fs::read_to_string(&written).unwrap(),
        format!(
            "hashtag,originfile\r\n#planning,{d}\r\n#alice,{d}\r\n",
            d = doc.display()
        )
    );
}

#[test]
fn report_honours_output_and_filename() {
    let tmp = setup_notes();
    let notes = tmp.path().join("notes");
    let out = tmp.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let (_, stderr, ok) = run(&[
        "--progress",
        "off",
        "report",
        arg(&notes),
        "--output",
        arg(&out),
        "--filename",
        "tags",
    ]);
    assert!(ok, "report failed: {}", stderr);
    assert!(out.join("tags.csv").exists());
    assert!(!notes.join("hashtags.csv").exists());
}

#[test]
fn report_rejects_filename_with_separator() {
    let tmp = setup_notes();
    let notes = tmp.path().join("notes");
    let (_, _, ok) = run(&["report", arg(&notes), "--filename", "a/b"]);
    assert!(!ok);
}

#[test]
fn report_fails_on_broken_document() {
    let tmp = setup_notes();
    let notes = tmp.path().join("notes");
    fs::write(notes.join("broken.odt"), b"not a zip").unwrap();

    let (_, stderr, ok) = run(&["--progress", "off", "report", arg(&notes)]);
    assert!(!ok);
    assert!(stderr.contains("broken.odt"), "stderr: {}", stderr);
    assert!(!notes.join("hashtags.csv").exists());
}

#[test]
fn json_progress_goes_to_stderr() {
    let tmp = setup_notes();
    let notes = tmp.path().join("notes");

    let (stdout, stderr, ok) = run(&["--progress", "json", "report", arg(&notes)]);
    assert!(ok, "report failed: {}", stderr);
    assert_eq!(stdout.lines().count(), 1);

    let events: Vec<serde_json::Value> = stderr
        .lines()
        .filter_map(|l| serde_json::from_str(l).ok())
        .collect();
    assert_eq!(events.first().unwrap()["phase"], "discovering");
    assert_eq!(events.last().unwrap()["event"], "written");
    assert_eq!(events.last().unwrap()["records"], 2);
}

#[test]
fn collect_list_text_and_tags() {
    let tmp = setup_notes();
    let notes = tmp.path().join("notes");
    let doc = notes.join("2024").join("jan.odt");

    let (stdout, _, ok) = run(&["collect", arg(&notes)]);
    assert!(ok);
    assert_eq!(stdout, "#planning\n#alice\n");

    let (stdout, _, ok) = run(&["collect", arg(&notes), "--with-origin"]);
    assert!(ok);
    assert_eq!(
        stdout,
        format!("#planning\t{d}\n#alice\t{d}\n", d = doc.display())
    );

    let (stdout, _, ok) = run(&["list", arg(&notes)]);
    assert!(ok);
    assert_eq!(stdout.trim(), doc.display().to_string());

    let (stdout, _, ok) = run(&["text", arg(&doc)]);
    assert!(ok);
    assert_eq!(stdout, "Kickoff #planning\nOwner: #alice\n");

    let (stdout, _, ok) = run(&["tags", arg(&doc)]);
    assert!(ok);
    assert_eq!(stdout, "#planning\n#alice\n");
}

#[test]
fn docx_format_via_flag_and_config() {
    let tmp = TempDir::new().unwrap();
    let docs = tmp.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("memo.docx"), docx_with_text("Budget #q3")).unwrap();

    let (stdout, _, ok) = run(&["--format", "docx", "collect", arg(&docs)]);
    assert!(ok);
    assert_eq!(stdout, "#q3\n");

    let config_path = tmp.path().join("hashtags.toml");
    fs::write(
        &config_path,
        "[scan]\nformat = \"docx\"\n\n[output]\nfilename = \"memo-tags\"\nline_terminator = \"lf\"\n",
    )
    .unwrap();
    let (_, stderr, ok) = run(&[
        "--config",
        arg(&config_path),
        "--progress",
        "off",
        "report",
        arg(&docs),
    ]);
    assert!(ok, "report failed: {}", stderr);
    assert_eq!(
        fs::read_to_string(docs.join("memo-tags.csv")).unwrap(),
        format!("hashtag,originfile\n#q3,{}\n", docs.join("memo.docx").display())
    );
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = setup_notes();
    let config_path = tmp.path().join("bad.toml");
    fs::write(&config_path, "[scan]\nextension = \"\"\n").unwrap();

    let (_, stderr, ok) = run(&[
        "--config",
        arg(&config_path),
        "list",
        arg(&tmp.path().join("notes")),
    ]);
    assert!(!ok);
    assert!(stderr.contains("scan.extension"), "stderr: {}", stderr);
}
