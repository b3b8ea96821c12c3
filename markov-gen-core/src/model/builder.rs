use super::dict::Symbol;
use super::lang::Lang;

/// Accumulates a token stream into a `Lang`.
///
/// Tokens are expected to be pre-segmented (punctuation split from
/// words); the builder lower-cases and interns each word and flushes
/// the pending chain into the transition table at every sentence
/// terminator.
///
/// # Notes
/// - `.`, `!` and `?` end the current chain
/// - `:`, `,`, `;` and other lone punctuation tokens are skipped
#[derive(Debug, Default)]
pub struct ChainBuilder {
	lang: Lang,
	chain: Vec<Symbol>,
}

impl ChainBuilder {
	pub fn new() -> Self {
		ChainBuilder {
			lang: Lang::new(),
			chain: Vec::new(),
		}
	}

	/// Handles one token from the extraction boundary.
	pub fn on_token(&mut self, tok: &str) {
		// TODO: handle numeric tokens specially

		let mut chars = tok.chars();
		if let (Some(r), None) = (chars.next(), chars.next()) {
			match r {
				'.' | '!' | '?' => {
					self.flush();
					return;
				}
				':' | ',' | ';' => return,
				r if r.is_ascii_punctuation() => return,
				_ => {}
			}
		}

		let stok = tok.to_lowercase();
		let sym = self.lang.dict.add(&stok);
		self.chain.push(sym);
	}

	/// Ingests the pending chain into the transition table.
	pub fn flush(&mut self) {
		self.lang.trans.add_chain(&self.chain);
		self.chain.clear();
	}

	/// Flushes any pending tokens and returns the built language.
	pub fn finish(mut self) -> Lang {
		if !self.chain.is_empty() {
			self.flush();
		}
		self.lang
	}
}

/// Splits text into saner document tokens: words separate on
/// whitespace, punctuation runs split as their own token rather than
/// staying attached to the start or end of a word. Word-internal
/// hyphens, apostrophes and quotes stay attached.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
	Tokens { rest: text }
}

struct Tokens<'a> {
	rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
	type Item = &'a str;

	fn next(&mut self) -> Option<&'a str> {
		let rest = self.rest.trim_start();
		let mut iter = rest.char_indices();
		let (_, first) = iter.next()?;

		let mut end = rest.len();
		if is_punct(first) {
			// scan a punctuation run
			for (i, r) in iter {
				if !is_punct(r) {
					end = i;
					break;
				}
			}
		} else {
			for (i, r) in iter {
				if r.is_whitespace() {
					end = i;
					break;
				}
				if is_punct(r) && !is_word_punct(r) {
					end = i;
					break;
				}
			}
		}

		self.rest = &rest[end..];
		Some(&rest[..end])
	}
}

fn is_punct(r: char) -> bool {
	r.is_ascii_punctuation() || matches!(r, '‘' | '’' | '“' | '”' | '—' | '–')
}

/// Punctuation allowed inside a word token.
fn is_word_punct(r: char) -> bool {
	matches!(r, '-' | '\'' | '"' | '`' | '‘' | '’')
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::dict::Symbol;

	#[test]
	fn sentence_terminators_flush_chains() {
		let mut bld = ChainBuilder::new();
		for tok in ["The", "cat", "sat", ".", "It", "slept", "!"] {
			bld.on_token(tok);
		}
		let lng = bld.finish();

		// two chains started
		let starts = lng.trans.successors(Symbol::NONE).unwrap();
		assert_eq!(starts.values().sum::<u64>(), 2);

		// words are lower-cased before interning
		assert!(lng.dict.get_sym("the").is_some());
		assert!(lng.dict.get_sym("The").is_none());

		// terminators themselves are not part of the chains
		let stop = lng.dict.get_sym(".").unwrap();
		assert!(lng.trans.successors(stop).is_none());
	}

	#[test]
	fn lone_punctuation_is_skipped() {
		let mut bld = ChainBuilder::new();
		for tok in ["one", ",", "two", ":", ";", "-", "."] {
			bld.on_token(tok);
		}
		let lng = bld.finish();
		let one = lng.dict.get_sym("one").unwrap();
		let two = lng.dict.get_sym("two").unwrap();
		assert_eq!(lng.trans.successors(one).unwrap()[&two], 1);
	}

	#[test]
	fn finish_flushes_unterminated_chain() {
		let mut bld = ChainBuilder::new();
		bld.on_token("dangling");
		let lng = bld.finish();
		let sym = lng.dict.get_sym("dangling").unwrap();
		assert_eq!(lng.trans.successors(sym).unwrap()[&Symbol::NONE], 1);
	}

	#[test]
	fn tokens_split_punctuation_runs() {
		let toks: Vec<&str> = tokens("Who's there? It--well, \"it\" waited...").collect();
		assert_eq!(
			toks,
			// a leading quote splits off; quotes only stay word-internal
			vec!["Who's", "there", "?", "It--well", ",", "\"", "it\"", "waited", "..."]
		);
	}

	#[test]
	fn tokens_on_empty_input() {
		assert_eq!(tokens("").count(), 0);
		assert_eq!(tokens("   \n\t ").count(), 0);
	}
}
