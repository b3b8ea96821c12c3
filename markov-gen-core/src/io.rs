use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Opens a file and JSON-decodes it into `T`.
///
/// - Decode failures surface as `MarkovError::Decode`
/// - I/O failures surface as `MarkovError::Io`
pub(crate) fn read_json<T, P>(path: P) -> Result<T>
where
	T: DeserializeOwned,
	P: AsRef<Path>,
{
	let file = File::open(path)?;
	Ok(serde_json::from_reader(BufReader::new(file))?)
}
