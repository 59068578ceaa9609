//! Core of the cachegen toolchain.
//!
//! cachegen compiles a line-oriented description of a cache hierarchy into
//! C++ that instantiates the cache simulation template library. The
//! pipeline is roughly:
//!
//!   source .cdsl
//!     -> grammar / parser (one statement per line)
//!     -> typecheck        (template families and parameter categories)
//!     -> connect          (entities and connection range expansion)
//!     -> codegen_cpp      (header + init() source)
//!
//! All state of one compilation lives in a [`Context`]. The command-line
//! driver and tests should depend on this crate rather than reimplementing
//! the pipeline.

// ---------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------

pub mod error;

// ---------------------------------------------------------------------
// Front-end: grammar and statement parsing
// ---------------------------------------------------------------------

pub mod grammar;
pub mod parser;
pub mod ast;

// ---------------------------------------------------------------------
// Semantic layers: symbol tables, type families, validation, wiring
// ---------------------------------------------------------------------

pub mod builtins;
pub mod types;
pub mod typecheck;
pub mod context;
pub mod entity;
pub mod connect;

// ---------------------------------------------------------------------
// Back-end: code generation and compiler orchestration
// ---------------------------------------------------------------------

pub mod codegen_cpp;
pub mod compiler;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use compiler::{CompilationArtifact, CompileOptions, Compiler, ErrorPolicy, compile};
pub use context::Context;
pub use error::CoreError;
