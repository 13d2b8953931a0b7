pub mod config;
pub mod engine;
pub mod error;
pub mod platform;
pub mod progress;
pub mod restore;
pub mod scanner;
pub mod sidecar;

pub use config::RestoreConfig;
pub use engine::{RestoreEngine, RunReport, SkipRecord};
pub use error::{Error, SkipReason};
pub use platform::VisibilityNormalizer;
pub use progress::{ProgressReporter, SilentReporter};
