//! Per-level word lists.
use crate::core::types::Entry;
use crate::error::{HskError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Words tagged with exactly the one given level.
    Exclusive,
    /// Words tagged with any of the given levels.
    Inclusive,
}

impl FilterMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::Exclusive => "exclusive",
            FilterMode::Inclusive => "inclusive",
        }
    }
}

impl FromStr for FilterMode {
    type Err = HskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "exclusive" => Ok(FilterMode::Exclusive),
            "inclusive" => Ok(FilterMode::Inclusive),
            other => Err(HskError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selects the entries matching `levels` and returns copies without their
/// `level` tags. Exclusive mode only looks at the first level.
pub fn filter_entries<S: AsRef<str>>(
    entries: &[Entry],
    mode: FilterMode,
    levels: &[S],
) -> Result<Vec<Entry>> {
    let Some(first) = levels.first() else {
        return Err(HskError::MissingLevels(mode.as_str()));
    };

    let selected = entries
        .iter()
        .filter(|entry| match mode {
            FilterMode::Exclusive => entry.has_level(first.as_ref()),
            FilterMode::Inclusive => entry.has_any_level(levels),
        })
        .map(|entry| Entry {
            level: None,
            ..entry.clone()
        })
        .collect();
    Ok(selected)
}

/// `new-3` → `3`.
pub fn level_number(tag: &str) -> String {
    tag.replace("old-", "").replace("new-", "")
}

/// `<wordlists>/<mode>/<old|new>/<n>.json`: the scheme comes from the first
/// level, the file name from the last one.
pub fn output_path<S: AsRef<str>>(
    wordlists_dir: &Path,
    mode: FilterMode,
    levels: &[S],
) -> Result<PathBuf> {
    let (Some(first), Some(last)) = (levels.first(), levels.last()) else {
        return Err(HskError::MissingLevels(mode.as_str()));
    };
    let scheme = if first.as_ref().contains("old") { "old" } else { "new" };
    Ok(wordlists_dir
        .join(mode.as_str())
        .join(scheme)
        .join(format!("{}.json", level_number(last.as_ref()))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(simplified: &str, levels: &[&str]) -> Entry {
        Entry {
            simplified: simplified.to_string(),
            level: Some(levels.iter().map(|l| l.to_string()).collect()),
            ..Entry::default()
        }
    }

    fn words(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.simplified.as_str()).collect()
    }

    #[test]
    fn exclusive_takes_single_level() {
        let data = vec![
            word("你", &["new-1"]),
            word("好", &["new-1", "old-1"]),
            word("学", &["new-2"]),
            word("习", &["old-2"]),
        ];
        let out = filter_entries(&data, FilterMode::Exclusive, &["new-1"]).unwrap();
        assert_eq!(words(&out), vec!["你", "好"]);

        let out = filter_entries(&data, FilterMode::Exclusive, &["new-2", "new-1"]).unwrap();
        assert_eq!(words(&out), vec!["学"]);
    }

    #[test]
    fn inclusive_takes_any_level() {
        let data = vec![
            word("你", &["new-1"]),
            word("好", &["new-1", "old-1"]),
            word("学", &["new-2"]),
            word("习", &["new-3"]),
        ];
        let out = filter_entries(&data, FilterMode::Inclusive, &["new-1", "new-2"]).unwrap();
        assert_eq!(words(&out), vec!["你", "好", "学"]);
    }

    #[test]
    fn selected_copies_lose_level_only() {
        let data = vec![word("好", &["new-1"])];
        let out = filter_entries(&data, FilterMode::Inclusive, &["new-1"]).unwrap();
        assert!(out[0].level.is_none());
        assert_eq!(out[0].simplified, "好");
        assert!(data[0].level.is_some());
    }

    #[test]
    fn untagged_entries_never_match() {
        let data = vec![Entry::default()];
        let out = filter_entries(&data, FilterMode::Inclusive, &["new-1"]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn levels_are_required() {
        let none: [&str; 0] = [];
        let err = filter_entries(&[], FilterMode::Exclusive, &none).unwrap_err();
        assert!(matches!(err, HskError::MissingLevels("exclusive")));
    }

    #[test]
    fn parses_modes() {
        assert_eq!("inclusive".parse::<FilterMode>().unwrap(), FilterMode::Inclusive);
        assert!(matches!(
            "sideways".parse::<FilterMode>(),
            Err(HskError::InvalidMode(m)) if m == "sideways"
        ));
    }

    #[test]
    fn output_locations() {
        let root = Path::new("wordlists");
        assert_eq!(
            output_path(root, FilterMode::Exclusive, &["old-4"]).unwrap(),
            PathBuf::from("wordlists/exclusive/old/4.json")
        );
        assert_eq!(
            output_path(root, FilterMode::Inclusive, &["new-1", "new-2", "new-3"]).unwrap(),
            PathBuf::from("wordlists/inclusive/new/3.json")
        );
    }
}
