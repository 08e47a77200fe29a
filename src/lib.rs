// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod sampler;
pub mod session;
pub mod summary;
pub mod time_series;
pub mod trainer;
pub mod typing_policy;
pub mod util;

pub use catalog::{Catalog, Language, Text};
pub use error::{CatalogError, TrainerError};
pub use session::{Difficulty, SessionConfig, SessionState, SessionStatus};
pub use trainer::{Keystroke, Trainer};
