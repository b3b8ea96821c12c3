//! Top-level module for the Markov language system.
//!
//! This module provides the symbolic model components:
//! - String interning dictionary (`Dict`) and its `Symbol` handles
//! - Weighted transition table (`Trans`) with chain generation
//! - The (`Dict`, `Trans`) pairing (`Lang`) and its merge operation
//! - Token-stream ingestion (`ChainBuilder`)
//! - The extracted-document database (`DocDb`)

/// String interning dictionary mapping between strings and `Symbol`
/// handles, with fixed reserved control symbols.
pub mod dict;

/// Weighted symbol transition table.
///
/// Handles chain ingestion, weighted-random chain generation, merging
/// under a symbol rewrite, and the serialized record format.
pub mod trans;

/// A language as its dictionary and transition table.
pub mod lang;

/// Token-stream ingestion into a `Lang`.
pub mod builder;

/// Database of extracted documents: per-document metadata, the title
/// language and the inverted title-word index.
pub mod db;
