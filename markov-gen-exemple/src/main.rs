use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;

use markov_gen_core::error::MarkovError;
use markov_gen_core::r#gen::{DocGen, Gen};
use markov_gen_core::model::builder::{ChainBuilder, tokens};
use markov_gen_core::model::db::{Doc, DocDb, DocInfo};
use tracing::{info, warn};

/// Learns a language model from one text file, dumping the document
/// model next to it. The first non-empty line serves as the title.
fn process(path: &str) -> Result<DocInfo, Box<dyn std::error::Error>> {
	let text = fs::read_to_string(path)?;

	let mut lines = text.lines().filter(|line| !line.trim().is_empty());
	let title = lines
		.next()
		.ok_or_else(|| format!("{path}: empty document"))?
		.trim()
		.trim_matches(['"', '\'', '?', '!', '.'])
		.to_owned();

	// Feed the remaining text through the ingestion builder
	let mut bld = ChainBuilder::new();
	for line in lines {
		for tok in tokens(line) {
			bld.on_token(tok);
		}
	}

	let doc = Doc {
		title: title.clone(),
		info: HashMap::from([("sourceFile".to_owned(), path.to_owned())]),
		lang: bld.finish(),
	};

	let trans_file = Path::new(path).with_extension("markov.json");
	fs::write(&trans_file, serde_json::to_vec(&doc)?)?;
	info!(path, trans_file = %trans_file.display(), "processed");

	Ok(DocInfo {
		source_file: path.to_owned(),
		trans_file: trans_file.to_string_lossy().into_owned(),
		title,
		info: doc.info.clone(),
	})
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| "info".into()),
		)
		.with_writer(std::io::stderr)
		.init();

	let args: Vec<String> = std::env::args().skip(1).collect();
	if args.is_empty() {
		eprintln!("usage: markov-gen-exemple TEXT_FILE...");
		std::process::exit(2);
	}

	// Index every input document into the database
	let mut db = DocDb::new();
	for path in &args {
		match process(path) {
			Ok(di) => db.index_doc(di),
			Err(err) => warn!(path = %path, %err, "failed to process"),
		}
	}
	info!(docs = db.docs.len(), "database built");

	let mut generator = DocGen::with_rng(db, StdRng::from_os_rng());

	// A title only counts once enough documents support its words; on a
	// small demo corpus, fall back to an unchecked title over all docs
	let (title, docs) = match generator.gen_title() {
		Ok(generated) => generated,
		Err(MarkovError::NoAcceptableTitle) => {
			warn!("thin corpus; using an unchecked title");
			let mut rng = StdRng::from_os_rng();
			let (title, mut docs) = generator.db().gen_title(&mut rng);
			for id in generator.db().docs.keys() {
				docs.support(id, id);
			}
			(title, docs)
		}
		Err(err) => return Err(err.into()),
	};

	let stdout = std::io::stdout();
	let mut out = stdout.lock();
	generator.gen_book(&title, &docs, &mut out)?;
	out.flush()?;

	Ok(())
}
