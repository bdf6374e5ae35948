//! Home Feed - a feed-to-JSON updater
//!
//! This crate refreshes the news sections of a static homepage's `home.json`
//! from remote RSS/Atom feeds. Each run replaces the `markets` and `foss`
//! sections wholesale and re-stamps the document; `projects` is never touched.

pub mod config;
pub mod document;
pub mod fetcher;
pub mod updater;
