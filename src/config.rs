// src/config.rs
use crate::filter::FilterMode;
use clap::{Parser, Subcommand};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

pub const DATASET_FILE: &str = "complete.json";
pub const WORDLISTS_DIR: &str = "wordlists";
/// Overrides the dataset root when `--root` is not given.
pub const ROOT_ENV: &str = "HSK_ROOT";

/// A family of HSK levels, e.g. `new-1` through `new-7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelScheme {
    pub name: &'static str,
    pub levels: RangeInclusive<u8>,
}

impl LevelScheme {
    pub fn tag(&self, level: u8) -> String {
        format!("{}-{}", self.name, level)
    }

    pub fn tags(&self) -> impl Iterator<Item = String> + '_ {
        self.levels.clone().map(|level| self.tag(level))
    }
}

/// The 2.0 (six levels) and 3.0 (seven levels) HSK syllabi.
pub fn level_schemes() -> [LevelScheme; 2] {
    [
        LevelScheme { name: "old", levels: 1..=6 },
        LevelScheme { name: "new", levels: 1..=7 },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub root_dir: PathBuf,
    /// Report what would be written without touching the filesystem.
    pub dry_run: bool,
    /// Also write the bincode snapshot next to each minified file.
    pub binary: bool,
}

impl PipelineConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            dry_run: false,
            binary: false,
        }
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.root_dir.join(DATASET_FILE)
    }

    pub fn wordlists_dir(&self) -> PathBuf {
        self.root_dir.join(WORDLISTS_DIR)
    }

    /// Resolves a user-supplied path against the root unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }
}

/// Command-line arguments of `hsk_tool`.
#[derive(Parser, Debug)]
#[clap(name = "hsk_tool", version, about = "Builds the HSK vocabulary dataset and its word lists.")]
pub struct Cli {
    /// Directory holding complete.json and wordlists/.
    #[clap(long, global = true, env = ROOT_ENV, default_value = ".")]
    pub root: PathBuf,

    /// Report what would be written without touching the filesystem.
    #[clap(long, global = true)]
    pub dry_run: bool,

    /// Also write a .min.bin snapshot next to each minified file.
    #[clap(long, global = true)]
    pub binary: bool,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> PipelineConfig {
        PipelineConfig {
            root_dir: self.root.clone(),
            dry_run: self.dry_run,
            binary: self.binary,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add spoken-tone transcriptions to complete.json.
    Sandhi,

    /// Write a level word list.
    Filter {
        /// `exclusive` or `inclusive`.
        mode: FilterMode,
        /// Level tags such as `new-1` or `old-3`.
        #[clap(required = true)]
        levels: Vec<String>,
    },

    /// Write the short-key .min.json next to a list.
    Minify {
        /// List to minify, relative to the root unless absolute.
        input: PathBuf,
    },

    /// Minify complete.json and build every word list.
    Process,
}
