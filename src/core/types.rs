// src/core/types.rs
use crate::core::converter::Notation;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One phrase per notation. Absent (or `null`) notations are `None` and are
/// never written back out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinyin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wadegiles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bopomofo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romatzyh: Option<String>,
}

/// Spoken-tone counterpart of a [`TranscriptionSet`]. Always derived, never edited.
pub type SandhiSet = TranscriptionSet;

impl TranscriptionSet {
    pub fn get(&self, notation: Notation) -> Option<&str> {
        self.slot(notation).as_deref()
    }

    pub fn set(&mut self, notation: Notation, phrase: impl Into<String>) {
        *self.slot_mut(notation) = Some(phrase.into());
    }

    /// Populated notations in dataset key order.
    pub fn iter(&self) -> impl Iterator<Item = (Notation, &str)> + '_ {
        Notation::ALL
            .into_iter()
            .filter_map(move |n| self.get(n).map(|phrase| (n, phrase)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn slot(&self, notation: Notation) -> &Option<String> {
        match notation {
            Notation::Pinyin => &self.pinyin,
            Notation::Numeric => &self.numeric,
            Notation::WadeGiles => &self.wadegiles,
            Notation::Bopomofo => &self.bopomofo,
            Notation::Romatzyh => &self.romatzyh,
        }
    }

    fn slot_mut(&mut self, notation: Notation) -> &mut Option<String> {
        match notation {
            Notation::Pinyin => &mut self.pinyin,
            Notation::Numeric => &mut self.numeric,
            Notation::WadeGiles => &mut self.wadegiles,
            Notation::Bopomofo => &mut self.bopomofo,
            Notation::Romatzyh => &mut self.romatzyh,
        }
    }
}

/// A traditional spelling of a headword with its readings and meanings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Form {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traditional: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcriptions: Option<TranscriptionSet>,
    #[serde(default)]
    pub meanings: Vec<String>,
    /// `None` when the key is absent, `Some(None)` when it is an explicit `null`.
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub classifiers: Option<Option<Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandhi: Option<SandhiSet>,
    /// Keys this model does not know about, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A headword of the vocabulary dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub simplified: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radical: Option<String>,
    /// Level tags such as `new-1` or `old-3`. Stripped from filtered word lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forms: Option<Vec<Form>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Form {
    pub fn classifiers(&self) -> Option<&[String]> {
        self.classifiers.as_ref().and_then(|c| c.as_deref())
    }
}

/// Marks a key as present even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl Entry {
    pub fn has_level(&self, tag: &str) -> bool {
        self.level.as_ref().is_some_and(|levels| levels.iter().any(|l| l == tag))
    }

    pub fn has_any_level<S: AsRef<str>>(&self, tags: &[S]) -> bool {
        tags.iter().any(|t| self.has_level(t.as_ref()))
    }

    pub fn forms(&self) -> &[Form] {
        self.forms.as_deref().unwrap_or_default()
    }
}
