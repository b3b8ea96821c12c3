use rand::Rng;
use tracing::debug;

use crate::error::{MarkovError, Result};
use crate::model::db::{DocDb, SupportDocIds};

/// Generates a title with enough well-supported documents behind it.
///
/// Short supporting words are too common to say anything about a
/// document, so they are dropped before counting support.
pub(super) fn gen_title<R: Rng>(db: &DocDb, rng: &mut R) -> Result<(String, SupportDocIds)> {
	const NUM_ATTEMPTS: usize = 100;
	const MIN_SUPPORT_WORD_LENGTH: usize = 3;
	const MIN_SUPPORT_DOCS: usize = 9;

	for attempt in 0..NUM_ATTEMPTS {
		let (title, mut docs) = db.gen_title(rng);
		docs.retain(|_, word| word.len() > MIN_SUPPORT_WORD_LENGTH);
		if docs.len() > MIN_SUPPORT_DOCS {
			return Ok((title, docs));
		}
		debug!(attempt, title = %title, support = docs.len(), "rejected title");
	}
	Err(MarkovError::NoAcceptableTitle)
}
