use thiserror::Error;

/// Errors surfaced by model loading and generation.
///
/// Sink failures during a chain walk are not represented here: the walk
/// is generic over the sink's error type and propagates it verbatim.
/// Undefined symbol lookups are not errors either; they degrade to a
/// placeholder string on the rendering side.
#[derive(Error, Debug)]
pub enum MarkovError {
	/// No title with enough supporting documents could be produced.
	#[error("unable to produce acceptable title")]
	NoAcceptableTitle,

	/// A supporting document id has no entry in the database.
	#[error("no document {0:?} in database")]
	UnknownDoc(String),

	/// A serialized model failed to decode. Hard error, no partial
	/// recovery of a corrupt table is attempted.
	#[error("failed to decode model data: {0}")]
	Decode(#[from] serde_json::Error),

	/// Reading a document model file failed.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
