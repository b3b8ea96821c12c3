use std::io::{self, Write};

use rand::Rng;

use super::line::LineGen;
use crate::error::{MarkovError, Result};
use crate::model::db::{DocDb, SupportDocIds};
use crate::model::dict::Symbol;
use crate::model::lang::Lang;

/// Hard limit on generated words, with a cut-off notice once reached.
const LIMIT: usize = 10_000;

const LINE_WRAP: usize = 80 - 1;

/// Walk control for the content sink: finished normally, or an actual
/// write failure.
enum Flow {
	Done,
	Io(io::Error),
}

pub(super) fn gen_book<R: Rng>(
	db: &DocDb,
	rng: &mut R,
	title: &str,
	docs: &SupportDocIds,
	w: &mut dyn Write,
) -> Result<()> {
	let title = title_case(title);
	writeln!(w, "Title: {title:?}")?;
	write_doc_ids(docs, w)?;
	let lng = db.merged_doc_lang(docs)?;
	write_content(rng, &title, &lng, w)
}

fn write_doc_ids(docs: &SupportDocIds, w: &mut dyn Write) -> io::Result<()> {
	writeln!(w, "\nSupporting Docs:")?;
	for id in docs.sorted_ids() {
		writeln!(w, "- {id:?}")?;
	}
	writeln!(w)
}

fn write_content<R: Rng>(rng: &mut R, title: &str, lng: &Lang, w: &mut dyn Write) -> Result<()> {
	let mut head = title.to_uppercase();
	let pad = LINE_WRAP.saturating_sub(head.len()) / 2;
	if pad > 0 {
		head.insert_str(0, &" ".repeat(pad));
	}
	writeln!(w, "{head}\n")?;

	// TODO: handle punctuation better
	// TODO: maybe section headers

	let mut lg = LineGen::new(w);
	let mut chain_length = 0usize;
	let mut first = true;

	let walk = lng.trans.gen_chain(rng, |sym| -> std::result::Result<(), Flow> {
		match sym {
			Symbol::NONE | Symbol::EOF => return Err(Flow::Done),
			Symbol::GS => {
				first = true;
				lg.buf.push('\n');
				return lg.flush().map_err(Flow::Io);
			}
			_ => {}
		}

		let word = lng.dict.to_string(sym);
		lg.flush_if_exceeds(word.len(), LINE_WRAP).map_err(Flow::Io)?;

		if !lg.buf.is_empty() {
			lg.buf.push(' ');
		}
		if first {
			lg.buf.push_str(&title_case(&word));
			first = false;
		} else {
			lg.buf.push_str(&word);
		}

		chain_length += 1;
		if matches!(word.as_str(), "." | "!" | "?") {
			first = true;
			if chain_length >= LIMIT {
				lg.buf.push('\n');
				lg.flush().map_err(Flow::Io)?;
				lg.buf
					.push_str(&format!("-- Cut off by editorial oversight: exceeded {LIMIT} words"));
				lg.flush().map_err(Flow::Io)?;
				return Err(Flow::Done);
			}
		}

		Ok(())
	});

	match walk {
		Ok(()) | Err(Flow::Done) => lg.flush().map_err(MarkovError::Io),
		Err(Flow::Io(err)) => Err(err.into()),
	}
}

/// Upper-cases the first letter of each word, leaving the rest alone.
/// Apostrophes do not start a new word.
fn title_case(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	let mut word_start = true;
	for r in s.chars() {
		if word_start {
			out.extend(r.to_uppercase());
		} else {
			out.push(r);
		}
		word_start = !(r.is_alphanumeric() || r == '\'');
	}
	out
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;
	use std::fs;

	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::r#gen::{DocGen, Gen};
	use crate::model::builder::{ChainBuilder, tokens};
	use crate::model::db::DocInfo;

	#[test]
	fn title_case_capitalizes_words() {
		assert_eq!(title_case("the black cat"), "The Black Cat");
		assert_eq!(title_case("don't look back"), "Don't Look Back");
		assert_eq!(title_case(""), "");
	}

	fn doc_db(dir: &std::path::Path, texts: &[(&str, &str)]) -> (DocDb, SupportDocIds) {
		let mut db = DocDb::new();
		let mut docs = SupportDocIds::default();
		for (title, text) in texts {
			let mut bld = ChainBuilder::new();
			for tok in tokens(text) {
				bld.on_token(tok);
			}
			let doc = crate::model::db::Doc {
				title: (*title).to_owned(),
				info: HashMap::new(),
				lang: bld.finish(),
			};
			let path = dir.join(format!("{title}.json"));
			fs::write(&path, serde_json::to_vec(&doc).unwrap()).unwrap();
			db.index_doc(DocInfo {
				source_file: format!("{title}.txt"),
				trans_file: path.to_str().unwrap().to_owned(),
				title: (*title).to_owned(),
				info: HashMap::new(),
			});
			docs.support(title, "support");
		}
		(db, docs)
	}

	#[test]
	fn book_has_header_support_list_and_wrapped_body() {
		let dir = tempfile::tempdir().unwrap();
		let (db, docs) = doc_db(
			dir.path(),
			&[
				("Alpha", "the cat sat on the mat . the mat sagged ."),
				("Beta", "the dog sat on the cat . the cat ran ."),
			],
		);

		let mut generator = DocGen::with_rng(db, StdRng::seed_from_u64(17));
		let mut out = Vec::new();
		generator
			.gen_book("some generated title", &docs, &mut out)
			.unwrap();
		let out = String::from_utf8(out).unwrap();

		let mut lines = out.lines();
		assert_eq!(lines.next(), Some("Title: \"Some Generated Title\""));
		assert_eq!(lines.next(), Some(""));
		assert_eq!(lines.next(), Some("Supporting Docs:"));
		assert_eq!(lines.next(), Some("- \"Alpha\""));
		assert_eq!(lines.next(), Some("- \"Beta\""));
		assert_eq!(lines.next(), Some(""));

		let head = lines.next().unwrap();
		assert!(head.trim_start().starts_with("SOME GENERATED TITLE"));

		for line in out.lines() {
			assert!(line.len() <= 80, "overlong line: {line:?}");
		}

		// body words all come from the training texts
		let vocab = [
			"the", "cat", "dog", "mat", "sat", "on", "sagged", "ran",
		];
		for line in out.lines().skip(8) {
			for word in line.split_whitespace() {
				assert!(
					vocab.contains(&word.to_lowercase().as_str()),
					"unexpected word {word:?}"
				);
			}
		}
	}

	#[test]
	fn unknown_support_doc_fails_before_writing_content() {
		let db = DocDb::new();
		let mut docs = SupportDocIds::default();
		docs.support("ghost", "word");
		let mut generator = DocGen::with_rng(db, StdRng::seed_from_u64(1));
		let mut out = Vec::new();
		match generator.gen_book("a title", &docs, &mut out) {
			Err(MarkovError::UnknownDoc(id)) => assert_eq!(id, "ghost"),
			other => panic!("expected UnknownDoc, got {other:?}"),
		}
	}
}
