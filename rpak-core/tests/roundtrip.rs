use rpak_core::codec::ArchiveCodec;
use rpak_core::pack::create::CreateOptions;
use rpak_core::{RpaArchive, create, extract, list};
use std::fs;
use std::path::Path;

fn build_source_tree(root: &Path) {
    fs::create_dir_all(root.join("game/images")).unwrap();
    fs::write(root.join("game/script.rpyc"), b"\x01bytecode\x02").unwrap();
    fs::write(root.join("game/images/bg.png"), vec![0x89u8; 2048]).unwrap();
    fs::write(root.join("README.md"), b"# demo\n").unwrap();
}

fn read_channel(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn create_list_extract_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("game.rpak");
    let dest = dir.path().join("extracted");
    build_source_tree(&src);

    let created = create(&src, &out, CreateOptions::default(), None);
    assert!(created.success, "{}", created.message);
    assert_eq!(created.message, "Successfully created archive with 3 files");
    assert_eq!(created.files.len(), 3);
    assert!(created.files.contains(&"game/script.rpyc".to_string()));
    assert!(created.files.contains(&"game/images/bg.png".to_string()));
    assert!(out.exists());

    let listed = list(&out);
    assert!(listed.success);
    assert_eq!(listed.version, "3");
    assert_eq!(listed.message, "Found 3 files");
    let mut expect = created.files.clone();
    expect.sort();
    assert_eq!(listed.files, expect);

    let extracted = extract(&out, &dest, None);
    assert!(extracted.success, "{}", extracted.message);
    assert_eq!(extracted.message, "Successfully extracted 3 files");
    assert_eq!(extracted.files.len(), 3);

    // byte-identical content at the same relative path
    for rel in ["game/script.rpyc", "game/images/bg.png", "README.md"] {
        let host: std::path::PathBuf = rel.split('/').collect();
        assert_eq!(
            fs::read(src.join(&host)).unwrap(),
            fs::read(dest.join(&host)).unwrap(),
            "content mismatch for {rel}"
        );
    }
}

#[test]
fn create_reports_progress_to_channel() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("game.rpak");
    let channel = dir.path().join("progress.json");
    build_source_tree(&src);

    let created = create(&src, &out, CreateOptions::default(), Some(channel.as_path()));
    assert!(created.success);

    let v = read_channel(&channel);
    assert_eq!(v["operation"], "create");
    assert_eq!(v["status"], "completed");
    assert_eq!(v["totalFiles"], 3);
    assert_eq!(v["processedFiles"], 3);
    assert_eq!(v["currentFile"], "Complete");
    assert_eq!(v["errorMessage"], "");
    assert!(v["startTime"].as_i64().unwrap() > 0);
    assert!(v["lastUpdateTime"].as_i64().unwrap() >= v["startTime"].as_i64().unwrap());
}

#[test]
fn extract_reports_progress_to_channel() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("game.rpak");
    let dest = dir.path().join("extracted");
    let channel = dir.path().join("progress.json");
    build_source_tree(&src);

    assert!(create(&src, &out, CreateOptions::default(), None).success);
    let extracted = extract(&out, &dest, Some(channel.as_path()));
    assert!(extracted.success);

    let v = read_channel(&channel);
    assert_eq!(v["operation"], "extract");
    assert_eq!(v["status"], "completed");
    assert_eq!(v["totalFiles"], 3);
    assert_eq!(v["processedFiles"], 3);
}

#[test]
fn create_on_empty_tree_fails_without_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("empty");
    let out = dir.path().join("never.rpak");
    let channel = dir.path().join("progress.json");
    fs::create_dir_all(&src).unwrap();

    let res = create(&src, &out, CreateOptions::default(), Some(channel.as_path()));
    assert!(!res.success);
    assert_eq!(res.message, "No files found in source directory");
    assert!(res.files.is_empty());
    assert!(!out.exists(), "no partial archive may be written");

    let v = read_channel(&channel);
    assert_eq!(v["status"], "failed");
    assert_eq!(v["totalFiles"], 0);
    assert_eq!(v["errorMessage"], "No files found in source directory");
}

#[test]
fn create_on_missing_source_behaves_like_empty() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.rpak");

    let res = create(
        &dir.path().join("does-not-exist"),
        &out,
        CreateOptions::default(),
        None,
    );
    assert!(!res.success);
    assert_eq!(res.message, "No files found in source directory");
    assert!(!out.exists());
}

#[test]
fn v2_archive_round_trips_and_reports_version() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("v2.rpak");
    let dest = dir.path().join("extracted");
    build_source_tree(&src);

    let opts = CreateOptions { version: 2, key: 0 };
    assert!(create(&src, &out, opts, None).success);

    let listed = list(&out);
    assert_eq!(listed.version, "2");

    let extracted = extract(&out, &dest, None);
    assert!(extracted.success);
    assert_eq!(extracted.files.len(), 3);
}

#[test]
fn extract_of_empty_archive_succeeds_with_zero_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("empty.rpak");
    let dest = dir.path().join("extracted");

    let mut ar = RpaArchive::new(3, 0xDEAD_BEEF).unwrap();
    ar.save(&out).unwrap();

    let res = extract(&out, &dest, None);
    assert!(res.success);
    assert_eq!(res.message, "Successfully extracted 0 files");
    assert!(res.files.is_empty());
    assert!(dest.is_dir());
}

#[test]
fn list_of_unreadable_archive_reports_unknown_version() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.rpak");
    fs::write(&bogus, b"definitely not an archive").unwrap();

    let res = list(&bogus);
    assert!(!res.success);
    assert!(res.message.starts_with("Error: "));
    assert!(res.files.is_empty());
    assert_eq!(res.version, "unknown");

    let missing = list(&dir.path().join("missing.rpak"));
    assert!(!missing.success);
    assert_eq!(missing.version, "unknown");
}

#[test]
fn overwrites_existing_destination_files() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let out = dir.path().join("game.rpak");
    let dest = dir.path().join("extracted");
    build_source_tree(&src);

    assert!(create(&src, &out, CreateOptions::default(), None).success);

    fs::create_dir_all(dest.join("game")).unwrap();
    fs::write(dest.join("game/script.rpyc"), b"stale").unwrap();

    let res = extract(&out, &dest, None);
    assert!(res.success);
    assert_eq!(
        fs::read(dest.join("game/script.rpyc")).unwrap(),
        b"\x01bytecode\x02"
    );
}
