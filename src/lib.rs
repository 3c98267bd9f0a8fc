//! cssglue - a style asset build pipeline
//!
//! This library turns groups of `.css`, `.less`, `.sass` and `.scss` sources
//! into one readable stylesheet and/or one minified stylesheet per group:
//! - Classify sources and run preprocessors into a temp directory
//! - Concatenate everything in source order, optionally with a banner
//! - Minify the concatenated result
//!
//! The [`build`] module holds the pipeline, [`config`] the `cssglue.toml`
//! schema and loader.

pub mod build;
pub mod cli;
pub mod config;
pub mod logger;
