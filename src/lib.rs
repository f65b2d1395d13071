//! Match odds normalization pipeline.
//!
//! The pipeline is a thin, linear sequence: [`fetch`] retrieves the raw
//! positional payload through the fetch relay, [`normalize`] decodes and
//! deduplicates it, and [`project`] maps the result into the public response
//! shape using the pure helpers in [`format`].

pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod normalize;
pub mod project;
