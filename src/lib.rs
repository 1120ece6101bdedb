// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod filter;
pub mod minify;
pub mod persistence;
pub mod pipeline;
pub use crate::core::engine::SandhiEngine;
pub use crate::error::{HskError, Result};
