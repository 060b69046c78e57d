//! cc-optimize - flag high cyclomatic complexity in radon reports
//!
//! Loads a `radon cc --json` report into a [`session::ProfilerSession`] and
//! flags functions and methods whose complexity exceeds their file's mean,
//! the module mean, or a forced threshold.

pub mod cli;
pub mod config;
pub mod error;
pub mod flagger;
pub mod loader;
pub mod models;
pub mod reporters;
pub mod session;

pub use error::{ProfilerError, Result};
pub use models::{ComplexityReport, SignatureRecord};
pub use session::ProfilerSession;
