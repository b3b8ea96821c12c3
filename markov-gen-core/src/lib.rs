//! Order-1 Markov language modelling and regeneration library.
//!
//! This crate provides a symbolic Markov-chain engine including:
//! - String interning into small integer symbols
//! - Weighted transition tables over interned symbols
//! - Weighted-random chain generation with caller-supplied sinks
//! - Model merging without rescanning source text
//! - A document database layer for title and content synthesis
//!
//! Only the high-level API is exposed publicly. Low-level helpers
//! are kept internal to ensure consistency and prevent misuse.

/// Core language models: dictionary, transition table, merge, ingestion
/// and the document database.
pub mod model;

/// Title and book generation built on top of the models.
pub mod r#gen;

/// Crate-wide error type.
pub mod error;

/// I/O utilities (model file loading).
///
/// Not exposed
pub(crate) mod io;
