//! Title and book generation over a document database.
//!
//! `DocGen` drives the chain walker against the database's title
//! language and against merged per-document content languages, turning
//! generated symbol sequences into printable text.

use std::io::Write;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::model::db::{DocDb, SupportDocIds};

mod book;
mod line;
mod title;

/// An interface for generating book titles and corresponding content.
pub trait Gen {
	/// Generates and returns a book title with supporting document
	/// ids, or fails to do so and returns an error.
	fn gen_title(&mut self) -> Result<(String, SupportDocIds)>;

	/// Generates and writes book content to a writer based on a given
	/// title and supporting document id set. Any io error encountered
	/// while writing halts the process, and is returned.
	fn gen_book(&mut self, title: &str, docs: &SupportDocIds, w: &mut dyn Write) -> Result<()>;
}

/// Generates from a database of extracted documents.
///
/// The random generator is owned explicitly: construct with `with_rng`
/// and a seeded generator for deterministic output.
#[derive(Debug)]
pub struct DocGen<R: Rng = StdRng> {
	db: DocDb,
	rng: R,
}

impl DocGen<StdRng> {
	/// Constructs a generator over the given database, seeded from the
	/// operating system.
	pub fn new(db: DocDb) -> Self {
		DocGen {
			db,
			rng: StdRng::from_os_rng(),
		}
	}
}

impl<R: Rng> DocGen<R> {
	/// Constructs a generator with a caller-supplied random generator.
	pub fn with_rng(db: DocDb, rng: R) -> Self {
		DocGen { db, rng }
	}

	pub fn db(&self) -> &DocDb {
		&self.db
	}
}

impl<R: Rng> Gen for DocGen<R> {
	fn gen_title(&mut self) -> Result<(String, SupportDocIds)> {
		title::gen_title(&self.db, &mut self.rng)
	}

	fn gen_book(&mut self, title: &str, docs: &SupportDocIds, w: &mut dyn Write) -> Result<()> {
		book::gen_book(&self.db, &mut self.rng, title, docs, w)
	}
}
