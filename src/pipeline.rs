//! The dataset jobs behind the command-line tool. Each job returns a
//! [`Report`] and honours `dry_run` by rendering without writing.
use crate::config::PipelineConfig;
use crate::core::engine::SandhiEngine;
use crate::core::types::Entry;
use crate::error::Result;
use crate::filter::{self, FilterMode};
use crate::minify::{self, MinEntry};
use crate::persistence;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Headword shown by `sandhi --dry-run`.
pub const SAMPLE_HEADWORD: &str = "可以";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub path: PathBuf,
    pub entries: usize,
    pub bytes: usize,
    pub written: bool,
}

/// One numeric reading before and after sandhi.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandhiSample {
    pub headword: String,
    pub numeric: String,
    pub sandhi: String,
}

fn emit(config: &PipelineConfig, path: &Path, entries: usize, contents: &[u8]) -> Result<Report> {
    if !config.dry_run {
        persistence::write_atomic(path, contents)?;
    }
    Ok(Report {
        path: path.to_path_buf(),
        entries,
        bytes: contents.len(),
        written: !config.dry_run,
    })
}

/// Rewrites `complete.json` with a `sandhi` set on every form.
pub fn run_sandhi(config: &PipelineConfig) -> Result<(Report, Option<SandhiSample>)> {
    let path = config.dataset_path();
    let mut entries = persistence::load_dataset(&path)?;
    SandhiEngine::new().apply_to_dataset_in_place(&mut entries);

    let rendered = persistence::render_pretty(&entries)?;
    let report = emit(config, &path, entries.len(), rendered.as_bytes())?;
    Ok((report, sample(&entries)))
}

fn sample(entries: &[Entry]) -> Option<SandhiSample> {
    let entry = entries
        .iter()
        .find(|e| e.simplified == SAMPLE_HEADWORD)
        .or_else(|| entries.first())?;
    let form = entry.forms().first()?;
    Some(SandhiSample {
        headword: entry.simplified.clone(),
        numeric: form.transcriptions.as_ref()?.numeric.clone()?,
        sandhi: form.sandhi.as_ref()?.numeric.clone()?,
    })
}

/// Writes one level word list.
pub fn run_filter(
    config: &PipelineConfig,
    dataset: &[Entry],
    mode: FilterMode,
    levels: &[String],
) -> Result<(Report, Vec<Entry>)> {
    let selected = filter::filter_entries(dataset, mode, levels)?;
    if selected.is_empty() {
        warn!("No entries matched {} {:?}", mode, levels);
    }
    let path = filter::output_path(&config.wordlists_dir(), mode, levels)?;
    let rendered = persistence::render_pretty(&selected)?;
    let report = emit(config, &path, selected.len(), rendered.as_bytes())?;
    info!("{} {:?}: {} words", mode, levels, report.entries);
    Ok((report, selected))
}

/// Minifies an already-loaded list that lives (or would live) at `input`.
/// The second report is the binary snapshot, when requested.
pub fn minify_entries(
    config: &PipelineConfig,
    input: &Path,
    entries: &[Entry],
) -> Result<(Report, Option<Report>)> {
    let minified: Vec<MinEntry> = minify::minify(entries);
    let rendered = persistence::render_compact(&minified)?;
    let json = emit(config, &minify::minified_path(input), minified.len(), rendered.as_bytes())?;

    let binary = if config.binary {
        let bytes = persistence::render_binary(&minified)?;
        Some(emit(config, &minify::binary_path(input), minified.len(), &bytes)?)
    } else {
        None
    };
    Ok((json, binary))
}

/// Loads `input` (relative to the root) and minifies it.
pub fn run_minify(config: &PipelineConfig, input: &Path) -> Result<(Report, Option<Report>)> {
    let input = config.resolve(input);
    let entries = persistence::load_dataset(&input)?;
    minify_entries(config, &input, &entries)
}

/// Lists produced for one level of one scheme.
#[derive(Debug, Clone)]
pub struct LevelOutput {
    pub tag: String,
    pub exclusive: Report,
    pub inclusive: Report,
}

/// Builds the exclusive and cumulative inclusive lists of every level, minifying
/// each. `on_level` is called as soon as a level is finished.
pub fn run_levels<F>(config: &PipelineConfig, dataset: &[Entry], mut on_level: F) -> Result<()>
where
    F: FnMut(&str, &LevelOutput),
{
    for scheme in crate::config::level_schemes() {
        let mut cumulative: Vec<String> = Vec::new();
        for tag in scheme.tags() {
            let (exclusive, exclusive_list) =
                run_filter(config, dataset, FilterMode::Exclusive, std::slice::from_ref(&tag))?;
            minify_entries(config, &exclusive.path, &exclusive_list)?;

            cumulative.push(tag.clone());
            let (inclusive, inclusive_list) =
                run_filter(config, dataset, FilterMode::Inclusive, &cumulative)?;
            minify_entries(config, &inclusive.path, &inclusive_list)?;

            on_level(scheme.name, &LevelOutput { tag, exclusive, inclusive });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn dataset() -> Vec<Entry> {
        serde_json::from_value(json!([
            {
                "simplified": "可以",
                "level": ["new-1", "old-1"],
                "forms": [{
                    "transcriptions": { "numeric": "ke3 yi3", "pinyin": "kě yǐ" },
                    "meanings": ["can"]
                }]
            },
            {
                "simplified": "一定",
                "level": ["new-2", "old-2"],
                "forms": [{
                    "transcriptions": { "numeric": "yi1 ding4" },
                    "meanings": ["certainly"]
                }]
            }
        ]))
        .unwrap()
    }

    fn config_in(dir: &Path) -> PipelineConfig {
        PipelineConfig::new(dir)
    }

    #[test]
    fn sandhi_rewrites_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        persistence::save_dataset(&config.dataset_path(), &dataset()).unwrap();

        let (report, sample) = run_sandhi(&config).unwrap();
        assert!(report.written);
        assert_eq!(report.entries, 2);
        let sample = sample.unwrap();
        assert_eq!(sample.headword, "可以");
        assert_eq!(sample.numeric, "ke3 yi3");
        assert_eq!(sample.sandhi, "ke2 yi3");

        let reloaded = persistence::load_dataset(&config.dataset_path()).unwrap();
        let sandhi = reloaded[1].forms()[0].sandhi.as_ref().unwrap();
        assert_eq!(sandhi.numeric.as_deref(), Some("yi2 ding4"));
        assert!(sandhi.pinyin.is_none());
    }

    #[test]
    fn dry_run_leaves_disk_alone() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        persistence::save_dataset(&config.dataset_path(), &dataset()).unwrap();
        let before = fs::read_to_string(config.dataset_path()).unwrap();

        config.dry_run = true;
        let (report, _) = run_sandhi(&config).unwrap();
        assert!(!report.written);
        assert!(report.bytes > before.len());
        assert_eq!(fs::read_to_string(config.dataset_path()).unwrap(), before);
    }

    #[test]
    fn filter_writes_level_list() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let levels = vec!["new-2".to_string()];
        let (report, list) =
            run_filter(&config, &dataset(), FilterMode::Exclusive, &levels).unwrap();

        assert_eq!(report.path, dir.path().join("wordlists/exclusive/new/2.json"));
        assert_eq!(list.len(), 1);
        let written = persistence::load_dataset(&report.path).unwrap();
        assert_eq!(written[0].simplified, "一定");
        assert!(written[0].level.is_none());
    }

    #[test]
    fn minify_writes_json_and_binary() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.binary = true;
        persistence::save_dataset(&config.dataset_path(), &dataset()).unwrap();

        let (json, binary) = run_minify(&config, Path::new("complete.json")).unwrap();
        assert_eq!(json.path, dir.path().join("complete.min.json"));
        let text = fs::read_to_string(&json.path).unwrap();
        assert!(text.starts_with(r#"[{"s":"可以""#));

        let binary = binary.unwrap();
        let back = persistence::load_minified_binary(&binary.path).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].l, Some(vec!["n1".to_string(), "o1".to_string()]));
    }

    #[test]
    fn levels_cover_every_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut seen = Vec::new();
        run_levels(&config, &dataset(), |scheme, out| {
            seen.push((scheme.to_string(), out.tag.clone(), out.inclusive.entries));
        })
        .unwrap();

        assert_eq!(seen.len(), 13);
        assert_eq!(seen[0], ("old".to_string(), "old-1".to_string(), 1));
        assert_eq!(seen[1], ("old".to_string(), "old-2".to_string(), 2));
        assert_eq!(seen[12], ("new".to_string(), "new-7".to_string(), 2));
        assert!(dir.path().join("wordlists/inclusive/new/7.min.json").is_file());
        assert!(dir.path().join("wordlists/exclusive/old/6.json").is_file());
    }
}
