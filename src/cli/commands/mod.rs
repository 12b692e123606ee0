//! Command implementations for the entlist CLI
//!
//! Each command has its own module/file.

pub mod classify;
pub mod config;

// Re-export argument types for parser
pub use classify::ClassifyArgs;
pub use config::ConfigArgs;
