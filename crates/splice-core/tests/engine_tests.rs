//! End-to-end replace cycles against real files.

use pretty_assertions::assert_eq;
use splice_blocks::{BlockOptions, ScanMode, Span};
use splice_core::{
    DocumentStatus, EditStatus, Job, RunOptions, locate_in_document, plan, process_document,
    run_batch,
};
use splice_fs::{LineEnding, NormalizedPath, RobustnessConfig};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

fn run_options(dry_run: bool, parallel: bool) -> RunOptions {
    RunOptions {
        dry_run,
        parallel,
        robustness: RobustnessConfig {
            lock_timeout: Duration::from_millis(500),
            enable_fsync: false,
        },
    }
}

fn job(path: &Path, key: &str, replacement: &str) -> Job {
    Job {
        path: NormalizedPath::new(path),
        key: key.to_string(),
        replacement: replacement.to_string(),
        options: BlockOptions::default(),
        match_line_endings: false,
    }
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_concrete_scenario_on_disk() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "doc.ts", "a: {\n  x: 1,\n  y: { z: 2 }\n}\nb: { w: 3 }");

    let report = run_batch(&[job(&file, "a", "a: { x: 9 }")], &run_options(false, false));

    assert!(report.is_success());
    assert_eq!(report.documents[0].status, DocumentStatus::Updated);
    assert_eq!(fs::read_to_string(&file).unwrap(), "a: { x: 9 }\nb: { w: 3 }");
}

#[test]
fn test_crlf_document_keeps_its_newlines() {
    let dir = TempDir::new().unwrap();
    let original = "export const es = {\r\n    common: {\r\n        a: \"b\",\r\n    },\r\n    target: {\r\n        old: 1,\r\n    },\r\n};\r\n";
    let file = write(&dir, "es.ts", original);

    let report = run_batch(
        &[job(&file, "target", "    target: {\n        new: 2,\n    }")],
        &run_options(false, false),
    );
    assert!(report.is_success());

    let bytes = fs::read(&file).unwrap();
    let expected = "export const es = {\r\n    common: {\r\n        a: \"b\",\r\n    },\r\n    target: {\n        new: 2,\n    },\r\n};\r\n";
    assert_eq!(String::from_utf8(bytes).unwrap(), expected);
    assert_eq!(report.documents[0].line_ending, Some(LineEnding::CrLf));
}

#[test]
fn test_match_line_endings_converts_replacement() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "es.ts", "target: {\r\n}\r\nrest: {}\r\n");

    let mut crlf_job = job(&file, "target", "target: {\n    new: 2,\n}");
    crlf_job.match_line_endings = true;
    run_batch(&[crlf_job], &run_options(false, false));

    assert_eq!(
        fs::read_to_string(&file).unwrap(),
        "target: {\r\n    new: 2,\r\n}\r\nrest: {}\r\n"
    );
}

#[test]
fn test_key_not_found_skips_document_and_continues() {
    let dir = TempDir::new().unwrap();
    let missing_key = write(&dir, "en.ts", "other: { x: 1 }\n");
    let good = write(&dir, "es.ts", "target: { x: 1 }\n");

    let report = run_batch(
        &[
            job(&missing_key, "target", "target: {}"),
            job(&good, "target", "target: {}"),
        ],
        &run_options(false, false),
    );

    assert_eq!(report.documents[0].status, DocumentStatus::Skipped);
    assert_eq!(report.documents[0].edits[0].status, EditStatus::KeyNotFound);
    assert_eq!(report.documents[1].status, DocumentStatus::Updated);
    assert!(!report.is_success());

    assert_eq!(fs::read_to_string(&missing_key).unwrap(), "other: { x: 1 }\n");
    assert_eq!(fs::read_to_string(&good).unwrap(), "target: {}\n");
}

#[test]
fn test_unbalanced_block_fails_without_writing() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "broken.ts", "target: {\n  inner: {\n}\n");

    let report = run_batch(&[job(&file, "target", "target: {}")], &run_options(false, false));

    let document = &report.documents[0];
    assert_eq!(document.status, DocumentStatus::Failed);
    match &document.edits[0].status {
        EditStatus::Failed { reason } => assert!(reason.contains("Unbalanced")),
        other => panic!("unexpected status: {other:?}"),
    }
    assert_eq!(fs::read_to_string(&file).unwrap(), "target: {\n  inner: {\n}\n");
}

#[test]
fn test_missing_file_is_reported_and_batch_continues() {
    let dir = TempDir::new().unwrap();
    let good = write(&dir, "es.ts", "target: { x: 1 }\n");
    let absent = dir.path().join("absent.ts");

    let report = run_batch(
        &[job(&absent, "target", "target: {}"), job(&good, "target", "target: {}")],
        &run_options(false, false),
    );

    assert_eq!(report.documents[0].status, DocumentStatus::Failed);
    assert!(report.documents[0].error.as_deref().unwrap().contains("absent.ts"));
    assert_eq!(report.documents[1].status, DocumentStatus::Updated);
    assert_eq!(report.summary(), "1 updated, 0 unchanged, 0 skipped, 1 failed");
}

#[test]
fn test_dry_run_writes_nothing_and_attaches_diff() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "en.ts", "target: {\n  x: 1\n}\n");

    let report = run_batch(&[job(&file, "target", "target: { x: 2 }")], &run_options(true, false));

    let document = &report.documents[0];
    assert_eq!(document.status, DocumentStatus::Updated);
    assert!(document.dry_run);
    let change = document.change.as_ref().unwrap();
    assert!(change.unified.contains("+target: { x: 2 }"));
    assert!(change.unified.contains("-  x: 1"));
    assert_eq!(fs::read_to_string(&file).unwrap(), "target: {\n  x: 1\n}\n");
}

#[test]
fn test_identical_replacement_is_unchanged() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "en.ts", "pre\ntarget: { x: 1 }\n");

    let report = run_batch(&[job(&file, "target", "target: { x: 1 }")], &run_options(false, false));

    assert_eq!(report.documents[0].status, DocumentStatus::Unchanged);
    assert_eq!(
        report.documents[0].edits[0].status,
        EditStatus::Unchanged {
            span: Span::new(4, 20),
            line: 2
        }
    );
    assert!(report.is_success());
}

#[test]
fn test_several_edits_on_one_document_apply_in_order() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "en.ts", "a: { 1 }\nb: { 2 }\n");

    let jobs = [job(&file, "a", "a: { one }"), job(&file, "b", "b: { two }")];
    let report = run_batch(&jobs, &run_options(false, false));

    assert_eq!(report.documents.len(), 1);
    assert_eq!(report.documents[0].edits.len(), 2);
    assert_eq!(fs::read_to_string(&file).unwrap(), "a: { one }\nb: { two }\n");
}

#[test]
fn test_one_failing_edit_blocks_the_whole_document() {
    let dir = TempDir::new().unwrap();
    let content = "a: { 1 }\nb: { 2\n";
    let file = write(&dir, "en.ts", content);

    let jobs = [job(&file, "a", "a: { one }"), job(&file, "b", "b: { two }")];
    let report = run_batch(&jobs, &run_options(false, false));

    assert_eq!(report.documents[0].status, DocumentStatus::Failed);
    assert_eq!(fs::read_to_string(&file).unwrap(), content);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let seq_dir = TempDir::new().unwrap();
    let par_dir = TempDir::new().unwrap();
    let mut seq_jobs = Vec::new();
    let mut par_jobs = Vec::new();

    for i in 0..8 {
        let content = format!("head: {{}}\nitem: {{ value: {i}, nested: {{ k: 1 }} }}\ntail: {{}}\n");
        let name = format!("doc{i}.ts");
        seq_jobs.push(job(&write(&seq_dir, &name, &content), "item", "item: { value: 0 }"));
        par_jobs.push(job(&write(&par_dir, &name, &content), "item", "item: { value: 0 }"));
    }
    for (dir, jobs) in [(&seq_dir, &mut seq_jobs), (&par_dir, &mut par_jobs)] {
        let shared = write(dir, "shared.ts", "a: { 1 }\nb: { 2 }\n");
        jobs.push(job(&shared, "a", "a: { one }"));
        jobs.push(job(&dir.path().join(".").join("shared.ts"), "b", "b: { two }"));
    }

    let seq = run_batch(&seq_jobs, &run_options(false, false));
    let par = run_batch(&par_jobs, &run_options(false, true));

    assert_eq!(seq.summary(), par.summary());
    assert!(par.is_success());
    assert_eq!(
        fs::read_to_string(par_dir.path().join("shared.ts")).unwrap(),
        "a: { one }\nb: { two }\n"
    );
    let names = (0..8).map(|i| format!("doc{i}.ts")).chain(["shared.ts".to_string()]);
    for name in names {
        assert_eq!(
            fs::read_to_string(seq_dir.path().join(&name)).unwrap(),
            fs::read_to_string(par_dir.path().join(&name)).unwrap()
        );
    }
}

#[test]
fn test_aliased_paths_are_one_document_in_parallel() {
    for _ in 0..20 {
        let dir = TempDir::new().unwrap();
        let file = write(&dir, "en.ts", "a: { 1 }\nb: { 2 }\n");
        let dotted = dir.path().join(".").join("en.ts");

        let jobs = [job(&file, "a", "a: { one }"), job(&dotted, "b", "b: { two }")];
        let report = run_batch(&jobs, &run_options(false, true));

        assert!(report.is_success(), "{}", report.summary());
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.documents[0].edits.len(), 2);
        assert_eq!(fs::read_to_string(&file).unwrap(), "a: { one }\nb: { two }\n");
    }
}

#[test]
fn test_plan_groups_spellings_of_one_file() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "en.ts", "a: {}\n");
    let other = write(&dir, "es.ts", "a: {}\n");
    let dotted = dir.path().join(".").join("en.ts");

    let jobs = [
        job(&file, "a", "a: { x }"),
        job(&other, "a", "a: { y }"),
        job(&dotted, "b", "b: {}"),
    ];
    let groups = plan(&jobs);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, NormalizedPath::new(&file));
    assert_eq!(groups[0].1.len(), 2);
    assert_eq!(groups[0].1[1].key, "b");
}

#[test]
fn test_process_document_reports_checksums() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "en.ts", "a: {}\n");
    let path = NormalizedPath::new(&file);
    let j = job(&file, "a", "a: { x }");

    let report = process_document(&path, &[&j], &run_options(false, false));

    assert_eq!(
        report.checksum_after.as_deref(),
        Some(splice_fs::checksum::compute_content_checksum("a: { x }\n").as_str())
    );
    assert_ne!(report.checksum_before, report.checksum_after);
}

#[test]
fn test_locate_in_document_reports_lines() {
    let dir = TempDir::new().unwrap();
    let file = write(&dir, "en.ts", "x: {}\r\ntarget: {\r\n  a: \"}\"\r\n}\r\n");
    let options = BlockOptions::default().with_scan(ScanMode::StringAware);

    let located = locate_in_document(&NormalizedPath::new(&file), "target", &options).unwrap();

    assert_eq!(located.line, 2);
    assert_eq!(located.end_line, 4);
    assert_eq!(located.line_ending, LineEnding::CrLf);
    assert_eq!(located.span, Span::new(7, 29));
}
