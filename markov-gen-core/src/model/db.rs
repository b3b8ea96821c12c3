use std::collections::HashMap;
use std::convert::Infallible;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::tokens;
use super::dict::Symbol;
use super::lang::Lang;
use crate::error::{MarkovError, Result};
use crate::io::read_json;

/// A database of extracted documents. It contains a markov language for
/// generating a plausible document title, and an inverted index to map
/// back to supporting document info from such a title.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct DocDb {
	#[serde(rename = "docs")]
	pub docs: HashMap<String, DocInfo>,
	#[serde(rename = "titleLang")]
	pub title_lang: Lang,
	#[serde(rename = "invertedTitleWords")]
	pub inv_title_words: HashMap<String, Vec<String>>,
}

/// Meta data for a document in a `DocDb`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct DocInfo {
	pub source_file: String,
	pub trans_file: String,
	pub title: String,
	pub info: HashMap<String, String>,
}

/// An extracted document loaded from a `DocInfo` in a `DocDb`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Doc {
	pub title: String,
	pub info: HashMap<String, String>,
	#[serde(rename = "language")]
	pub lang: Lang,
}

impl DocInfo {
	/// Loads the document's serialized language model.
	pub fn load(&self) -> Result<Doc> {
		debug!(trans_file = %self.trans_file, "loading document model");
		read_json(&self.trans_file)
	}
}

/// Supporting document ids for a generated title, keyed by document id
/// with the best (longest) supporting title word as the value.
#[derive(Clone, Debug, Default)]
pub struct SupportDocIds(HashMap<String, String>);

impl SupportDocIds {
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Records `word` as supporting `id`, keeping the longest
	/// supporting word seen for that document.
	pub fn support(&mut self, id: &str, word: &str) {
		let prior = self.0.entry(id.to_owned()).or_default();
		if prior.len() < word.len() {
			*prior = word.to_owned();
		}
	}

	/// Drops documents whose supporting word fails the predicate.
	pub fn retain(&mut self, f: impl FnMut(&String, &mut String) -> bool) {
		self.0.retain(f);
	}

	/// Document ids in sorted order, for reproducible traversal.
	pub fn sorted_ids(&self) -> Vec<&str> {
		let mut ids: Vec<&str> = self.0.keys().map(String::as_str).collect();
		ids.sort_unstable();
		ids
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(id, word)| (id.as_str(), word.as_str()))
	}
}

impl DocDb {
	pub fn new() -> Self {
		DocDb {
			docs: HashMap::new(),
			title_lang: Lang::new(),
			inv_title_words: HashMap::new(),
		}
	}

	/// Indexes an extracted document, keyed by its title.
	///
	/// The first document seen under a given title wins. New titles are
	/// ingested into the title language (one chain per title) and into
	/// the inverted word → document-id index.
	pub fn index_doc(&mut self, di: DocInfo) {
		let id = di.title.clone();
		if self.docs.contains_key(&id) {
			debug!(id = %id, "already indexed");
			return;
		}

		let lowered = di.title.to_lowercase();
		let mut chain = Vec::new();
		for word in tokens(&lowered) {
			self.inv_title_words
				.entry(word.to_owned())
				.or_default()
				.push(id.clone());
			chain.push(self.title_lang.dict.add(word));
		}
		self.title_lang.trans.add_chain(&chain);

		debug!(id = %id, info = ?di.info, "indexed");
		self.docs.insert(id, di);
	}

	/// Generates a title from the title language, returning it along
	/// with the documents whose own titles support its words.
	pub fn gen_title<R: Rng>(&self, rng: &mut R) -> (String, SupportDocIds) {
		let mut words: Vec<String> = Vec::new();
		let mut docs = SupportDocIds::default();

		let walk = self
			.title_lang
			.trans
			.gen_chain(rng, |sym| -> std::result::Result<(), Infallible> {
				if sym == Symbol::NONE {
					return Ok(());
				}
				let word = self.title_lang.dict.to_string(sym);
				if let Some(ids) = self.inv_title_words.get(&word) {
					for id in ids {
						docs.support(id, &word);
					}
				}
				words.push(word);
				Ok(())
			});
		match walk {
			Ok(()) => {}
			Err(infallible) => match infallible {},
		}

		(words.join(" "), docs)
	}

	/// Builds one language model over the given supporting documents by
	/// loading each document's language and folding them together with
	/// `Lang::merge`. Documents merge in sorted id order so the result
	/// is reproducible.
	pub fn merged_doc_lang(&self, docs: &SupportDocIds) -> Result<Lang> {
		let mut lng = Lang::new();
		for id in docs.sorted_ids() {
			let di = self
				.docs
				.get(id)
				.ok_or_else(|| MarkovError::UnknownDoc(id.to_owned()))?;
			let doc = di.load()?;
			lng = lng.merge(&doc.lang);
		}
		Ok(lng)
	}
}
