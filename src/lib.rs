// Library surface for headless/integration tests and reuse.
// The TUI lives in main.rs and only talks to the engine through these modules.
pub mod classify;
pub mod completion;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod mode;
pub mod runtime;
pub mod session;

pub use error::{TfResult, TypeForgeError};
