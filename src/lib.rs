//! Tag-filtered CV generation from CSV sources.
//!
//! `cv-builder` reads flat, denormalized CV tables (one achievement or skill
//! per row), keeps the rows matching a set of tags, collapses them into
//! jobs and skill categories ordered by weight, and renders the result as a
//! LaTeX fragment or as JSON documents for a personal website. Every run is
//! deterministic: the same CSV input and tags produce the same bytes.

pub mod config;
pub mod external;
pub mod loader;
pub mod render;
pub mod selection;
pub mod types;
