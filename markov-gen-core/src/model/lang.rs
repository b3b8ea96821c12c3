use serde::{Deserialize, Serialize};

use super::dict::Dict;
use super::trans::Trans;

/// A language as its dictionary and transition table.
///
/// A `Lang` is one coherent learned model: created empty, mutated only
/// by the ingestion path, or combined with another model by `merge`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Lang {
	#[serde(rename = "dictionary")]
	pub dict: Dict,
	#[serde(rename = "transitions")]
	pub trans: Trans,
}

impl Lang {
	/// Creates a new lang with the reserved dictionary and an empty
	/// transition table.
	pub fn new() -> Self {
		Lang {
			dict: Dict::new(),
			trans: Trans::new(),
		}
	}

	/// Merges another language into a copy of this one, returning the
	/// new copy.
	///
	/// The other dictionary is merged first, producing the symbol
	/// rewrite under which the other transition table is accumulated
	/// into a copy of this one. Neither input is mutated, which allows
	/// building a composite model over many documents without ever
	/// reprocessing raw text.
	pub fn merge(&self, other: &Lang) -> Lang {
		let (rewrite, dict) = self.dict.merge(&other.dict);
		Lang {
			dict,
			trans: self.trans.merge(&other.trans, &rewrite),
		}
	}
}
