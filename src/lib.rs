//! ScriptCloak: regex-driven JavaScript source obfuscation service

pub mod archive;
pub mod batch;
pub mod config;
pub mod engine;
pub mod errors;
pub mod lexer;
pub mod logger;
pub mod metrics;
pub mod rename;
pub mod server;

// Re-exports
pub use batch::{run_batch, BatchOptions, ObfuscationResult, SourceUnit};
pub use engine::{obfuscate, ObfuscationOptions};
pub use errors::AppError;
pub use rename::{NameGenerator, RenameTable};
