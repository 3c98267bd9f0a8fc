//! Build pipeline module for cssglue
//!
//! Turns the file groups of each configured target into a chain of jobs
//! and runs them through a [`JobExecutor`].
//!
//! # Overview
//!
//! The build pipeline consists of:
//! - **Planning**: expand each target's file groups from config
//! - **Resolution**: fold default, task, target and policy options
//! - **Job building**: classify sources and emit `less`/`sass`, `concat`
//!   and `cssmin` jobs with their destinations
//! - **Execution**: hand each job to an executor, in order
//!
//! # Example
//!
//! ```ignore
//! use cssglue::build::{BuildContext, BuildPipeline};
//! use cssglue::config::load_config;
//!
//! let (config, path) = load_config(None)?;
//! let context = BuildContext::new(config, path.parent().unwrap().to_path_buf());
//! let pipeline = BuildPipeline::new(context);
//!
//! let result = pipeline.build()?;
//! println!("{}", result.summary());
//! ```

pub mod classify;
pub mod context;
pub mod dest;
pub mod engine;
pub mod error;
pub mod executor;
pub mod job;
pub mod namer;
pub mod options;
pub mod pipeline;
pub mod result;
pub mod target;

pub use classify::*;
pub use context::*;
pub use engine::*;
pub use error::*;
pub use executor::*;
pub use job::*;
pub use namer::*;
pub use options::*;
pub use pipeline::*;
pub use result::*;
pub use target::*;
