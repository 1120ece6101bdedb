//! Short-key schema for distributing the dataset.
//!
//! Missing values are written as `null`. The one exception is `l`, which is
//! left out of JSON when the entry has no levels; the binary snapshot is
//! positional and always carries every field.
use crate::core::types::{Entry, Form, TranscriptionSet};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// `pinyin`→`y`, `numeric`→`n`, `wadegiles`→`w`, `bopomofo`→`b`, `romatzyh`→`g`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinTranscriptions {
    pub y: Option<String>,
    pub n: Option<String>,
    pub w: Option<String>,
    pub b: Option<String>,
    pub g: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinForm {
    /// traditional
    pub t: Option<String>,
    /// transcriptions
    pub i: MinTranscriptions,
    /// sandhi
    pub z: Option<MinTranscriptions>,
    /// meanings
    pub m: Vec<String>,
    /// classifiers
    pub c: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MinEntry {
    /// simplified
    pub s: String,
    /// radical
    pub r: Option<String>,
    /// level, abbreviated
    #[serde(default)]
    pub l: Option<Vec<String>>,
    /// frequency
    pub q: Option<u64>,
    /// pos
    pub p: Option<Vec<String>>,
    /// forms
    pub f: Vec<MinForm>,
}

impl Serialize for MinEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let omit_level = self.l.is_none() && serializer.is_human_readable();
        let mut state = serializer.serialize_struct("MinEntry", if omit_level { 5 } else { 6 })?;
        state.serialize_field("s", &self.s)?;
        state.serialize_field("r", &self.r)?;
        if omit_level {
            state.skip_field("l")?;
        } else {
            state.serialize_field("l", &self.l)?;
        }
        state.serialize_field("q", &self.q)?;
        state.serialize_field("p", &self.p)?;
        state.serialize_field("f", &self.f)?;
        state.end()
    }
}

impl From<&TranscriptionSet> for MinTranscriptions {
    fn from(t: &TranscriptionSet) -> Self {
        Self {
            y: t.pinyin.clone(),
            n: t.numeric.clone(),
            w: t.wadegiles.clone(),
            b: t.bopomofo.clone(),
            g: t.romatzyh.clone(),
        }
    }
}

impl From<&Form> for MinForm {
    fn from(form: &Form) -> Self {
        Self {
            t: form.traditional.clone(),
            i: form.transcriptions.as_ref().map(Into::into).unwrap_or_default(),
            z: form.sandhi.as_ref().map(Into::into),
            m: form.meanings.clone(),
            c: form.classifiers().map(<[String]>::to_vec),
        }
    }
}

impl From<&Entry> for MinEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            s: entry.simplified.clone(),
            r: entry.radical.clone(),
            l: entry
                .level
                .as_ref()
                .map(|levels| levels.iter().map(|l| abbreviate_level(l)).collect()),
            q: entry.frequency,
            p: entry.pos.clone(),
            f: entry.forms().iter().map(MinForm::from).collect(),
        }
    }
}

/// `new-1` → `n1`, `old-6` → `o6`.
pub fn abbreviate_level(tag: &str) -> String {
    tag.replace("new-", "n").replace("old-", "o")
}

pub fn minify(entries: &[Entry]) -> Vec<MinEntry> {
    entries.iter().map(MinEntry::from).collect()
}

/// `wordlists/new/1.json` → `wordlists/new/1.min.json`.
pub fn minified_path(input: &Path) -> PathBuf {
    sibling_with_suffix(input, "min.json")
}

/// `complete.json` → `complete.min.bin`.
pub fn binary_path(input: &Path) -> PathBuf {
    sibling_with_suffix(input, "min.bin")
}

fn sibling_with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}.{suffix}"))
}
