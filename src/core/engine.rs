use crate::core::converter::Notation;
use crate::core::sandhi::{resolve_tones, Token};
use crate::core::types::{Entry, Form, SandhiSet};
use log::{debug, info};

/// Derives spoken-tone transcriptions for dataset entries.
///
/// Stateless: every phrase is handled on its own, so one engine can be shared
/// freely between threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SandhiEngine;

impl SandhiEngine {
    pub fn new() -> Self {
        Self
    }

    /// Applies tone sandhi to one phrase written in `notation`.
    ///
    /// Empty and single-syllable phrases come back verbatim, as does any
    /// notation whose tones cannot be decoded.
    pub fn apply_to_phrase(&self, notation: Notation, phrase: &str) -> String {
        let codec = notation.codec();
        if phrase.is_empty() || !codec.transforms() {
            return phrase.to_string();
        }

        let syllables: Vec<_> = phrase.split_whitespace().map(|s| codec.decode(s)).collect();
        if syllables.len() < 2 {
            return phrase.to_string();
        }

        let tokens: Vec<Token> = syllables
            .iter()
            .map(|s| Token::new(codec.lexeme(&s.base), s.tone))
            .collect();
        let spoken = resolve_tones(&tokens);

        let out = syllables
            .iter()
            .zip(spoken)
            .map(|(syllable, tone)| {
                if tone == syllable.tone {
                    syllable.surface.to_string()
                } else {
                    codec.encode(syllable, tone)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");

        if out != phrase {
            debug!("{notation}: '{phrase}' -> '{out}'");
        }
        out
    }

    /// Builds the form's `sandhi` set from its transcriptions. Only reads the
    /// transcriptions; a form without them is left alone.
    pub fn apply_to_form(&self, form: &mut Form) {
        let Some(source) = form.transcriptions.as_ref() else {
            return;
        };

        let mut sandhi = SandhiSet::default();
        for (notation, phrase) in source.iter() {
            sandhi.set(notation, self.apply_to_phrase(notation, phrase));
        }
        form.sandhi = Some(sandhi);
    }

    /// Enriches every form of `entry` in place. Other fields are untouched.
    pub fn apply_to_entry(&self, entry: &mut Entry) {
        let Some(forms) = entry.forms.as_mut() else {
            return;
        };
        for form in forms.iter_mut() {
            self.apply_to_form(form);
        }
    }

    /// Returns an enriched copy of the dataset; `entries` is not modified.
    pub fn apply_to_dataset(&self, entries: &[Entry]) -> Vec<Entry> {
        let mut out = entries.to_vec();
        self.apply_to_dataset_in_place(&mut out);
        out
    }

    /// Enriches the dataset in place. Returns the number of forms that got a `sandhi` set.
    pub fn apply_to_dataset_in_place(&self, entries: &mut [Entry]) -> usize {
        let mut forms = 0;
        for entry in entries.iter_mut() {
            self.apply_to_entry(entry);
            forms += entry.forms().iter().filter(|f| f.sandhi.is_some()).count();
        }
        info!("Applied sandhi to {} forms across {} entries", forms, entries.len());
        forms
    }
}
