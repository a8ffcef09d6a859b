// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod qid;

// Re-export public types for convenient access via `acton::core::TypeName`
pub use error::ActOnError;
pub use qid::Qid;
