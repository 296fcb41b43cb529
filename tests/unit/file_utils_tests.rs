/*!
 * Tests for file utility functions and document sources/sinks
 */

use std::fs;
use std::io::{BufRead, Write};
use anyhow::Result;
use ass2srt::file_utils::{DirectorySink, DocumentSink, DocumentSource, FileManager, FileSource};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "exists.ass", "content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::dir_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.ass"));
}

/// Test the destination name derivation
#[test]
fn test_derive_output_filename_withAssName_shouldSwapExtension() {
    assert_eq!(FileManager::derive_output_filename("episode01.ass", ".ass", ".srt"), "episode01.srt");
}

/// Test that every occurrence is replaced, not just the suffix
#[test]
fn test_derive_output_filename_withRepeatedPattern_shouldReplaceAll() {
    assert_eq!(
        FileManager::derive_output_filename("my.assets.ass", ".ass", ".srt"),
        "my.srtets.srt"
    );
}

/// Test names that do not contain the source extension
#[test]
fn test_derive_output_filename_withoutPattern_shouldAppendExtension() {
    assert_eq!(FileManager::derive_output_filename("subs", ".ass", ".srt"), "subs.srt");
    assert_eq!(FileManager::derive_output_filename("EP.ASS", ".ass", ".srt"), "EP.ASS.srt");
}

/// Test recursive file discovery
#[test]
fn test_find_files_withNestedDirs_shouldFindMatchingExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.ass", "")?;
    common::create_test_file(temp_dir.path(), "nested/b.ASS", "")?;
    common::create_test_file(temp_dir.path(), "nested/c.srt", "")?;

    let found = FileManager::find_files(temp_dir.path(), ".ass")?;
    let mut names: Vec<String> = found.iter().map(FileManager::file_name_of).collect();
    names.sort();

    assert_eq!(names, vec!["a.ass".to_string(), "b.ASS".to_string()]);
    Ok(())
}

/// Test that a file source reads lines and reports its name
#[test]
fn test_file_source_withExistingFile_shouldOpenReader() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "show.ass", "line one\nline two\n")?;

    let source = FileSource::new(&path);
    assert_eq!(source.display_name(), "show.ass");

    let lines: Vec<String> = source.open()?.lines().collect::<std::io::Result<_>>()?;
    assert_eq!(lines, vec!["line one", "line two"]);
    Ok(())
}

/// Test that a missing file fails to open
#[test]
fn test_file_source_withMissingFile_shouldFailToOpen() {
    let source = FileSource::new("definitely/missing.ass");
    assert!(source.open().is_err());
}

/// Test that the directory sink creates the directory and the file
#[test]
fn test_directory_sink_withNewDir_shouldCreateFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let out_dir = temp_dir.path().join("out");
    let sink = DirectorySink::new(&out_dir, false);

    let (mut writer, path) = sink.create("show.srt")?;
    writer.write_all(b"1\n")?;
    writer.flush()?;
    drop(writer);

    assert_eq!(path, out_dir.join("show.srt"));
    assert_eq!(fs::read_to_string(&path)?, "1\n");
    Ok(())
}

/// Test that the directory sink refuses to overwrite without force
#[test]
fn test_directory_sink_withExistingFile_shouldRespectForceFlag() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "show.srt", "old")?;

    let err = DirectorySink::new(temp_dir.path(), false).create("show.srt").err();
    assert!(err.map(|e| e.to_string().contains("already exists")).unwrap_or(false));

    let (mut writer, path) = DirectorySink::new(temp_dir.path(), true).create("show.srt")?;
    writer.write_all(b"new")?;
    writer.flush()?;
    drop(writer);

    assert_eq!(fs::read_to_string(path)?, "new");
    Ok(())
}
