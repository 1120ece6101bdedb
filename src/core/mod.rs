// src/core/mod.rs
pub mod converter;
pub mod engine;
pub mod sandhi;
pub mod tone;
pub mod types;
