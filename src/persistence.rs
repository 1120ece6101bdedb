// File: src/persistence.rs
use crate::core::types::Entry;
use crate::error::{HskError, Result};
use crate::minify::MinEntry;
use log::info;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub fn load_dataset(path: &Path) -> Result<Vec<Entry>> {
    if !path.is_file() {
        return Err(HskError::MissingDataset(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    let entries: Vec<Entry> = serde_json::from_reader(reader)?;
    info!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Pretty JSON, the layout used for `complete.json` and the word lists.
pub fn render_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Single-line JSON for distribution files.
pub fn render_compact<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn render_binary(entries: &[MinEntry]) -> Result<Vec<u8>> {
    Ok(bincode::serialize(entries)?)
}

/// Writes `contents` to `path` through a temporary file in the same directory,
/// so readers never observe a half-written file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        writer.write_all(contents)?;
        writer.flush()?;
    }

    temp_file.persist(path)?;
    info!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

pub fn save_dataset(path: &Path, entries: &[Entry]) -> Result<()> {
    write_atomic(path, render_pretty(entries)?.as_bytes())
}

pub fn load_minified_binary(path: &Path) -> Result<Vec<MinEntry>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(bincode::deserialize_from(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Form;
    use crate::minify::minify;

    fn sample() -> Vec<Entry> {
        vec![Entry {
            simplified: "你好".to_string(),
            level: Some(vec!["new-1".to_string()]),
            forms: Some(vec![Form {
                meanings: vec!["hello".to_string()],
                ..Form::default()
            }]),
            ..Entry::default()
        }]
    }

    #[test]
    fn dataset_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("complete.json");
        save_dataset(&path, &sample()).unwrap();
        assert_eq!(load_dataset(&path).unwrap(), sample());
    }

    #[test]
    fn overwrite_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        // Only the destination remains; the temp file was moved, not copied.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_dataset_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(&dir.path().join("complete.json")).unwrap_err();
        assert!(matches!(err, HskError::MissingDataset(_)));
    }

    #[test]
    fn malformed_dataset_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("complete.json");
        fs::write(&path, "[{").unwrap();
        assert!(matches!(load_dataset(&path), Err(HskError::Json(_))));
    }

    #[test]
    fn binary_snapshot_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("complete.min.bin");
        let min = minify(&sample());
        write_atomic(&path, &render_binary(&min).unwrap()).unwrap();
        assert_eq!(load_minified_binary(&path).unwrap(), min);
    }
}
