use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::dict::Symbol;

/// A weighted set of symbols.
///
/// Weights are positive observation counts, accumulated by addition and
/// never reset. Ordered so that iteration, and therefore generation
/// under a seeded generator, is reproducible.
pub type WeightedSymbols = BTreeMap<Symbol, u64>;

/// A symbol transition table.
///
/// Maps each source symbol to the weighted set of its observed
/// successors. Every ingested chain implicitly starts from
/// `Symbol::NONE` and ends with an edge back to it, so the table is
/// self-describing about chain starts and stops.
///
/// Not safe for concurrent mutation. Generation only reads the table
/// and may run concurrently across independent generators as long as
/// no writer is mutating the same table.
#[derive(Clone, Debug, Default)]
pub struct Trans(BTreeMap<Symbol, WeightedSymbols>);

impl Trans {
	pub fn new() -> Self {
		Trans(BTreeMap::new())
	}

	/// Returns the number of source symbols with outgoing edges.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the outgoing weighted set of a symbol, if any.
	pub fn successors(&self, sym: Symbol) -> Option<&WeightedSymbols> {
		self.0.get(&sym)
	}

	/// Adds a transition to the table, incrementing the weight for
	/// `a -> b` by the given delta. Creates the row and edge on demand;
	/// never fails.
	pub fn add(&mut self, a: Symbol, b: Symbol, delta: u64) {
		*self.0.entry(a).or_default().entry(b).or_insert(0) += delta;
	}

	/// Adds a chain of symbols to the table.
	///
	/// Walks pairs starting from the `Symbol::NONE` sentinel and closes
	/// the chain with an edge back to it, so that each call accounts for
	/// exactly one chain start.
	pub fn add_chain(&mut self, chain: &[Symbol]) {
		let mut last = Symbol::NONE;
		for &sym in chain {
			self.add(last, sym, 1);
			last = sym;
		}
		self.add(last, Symbol::NONE, 1);
	}

	/// Selects an outgoing symbol of `from` by weighted random choice,
	/// proportional to edge weight: each candidate edge of weight `w`
	/// draws a uniform `u` and scores `u^(1/w)`, and the highest score
	/// wins. Heavier edges score closer to 1 and win more often.
	///
	/// Returns `Symbol::NONE` when the symbol has no outgoing edges.
	fn pick<R: Rng>(&self, rng: &mut R, from: Symbol) -> Symbol {
		let mut next = Symbol::NONE;
		let mut best = -1.0_f64;
		if let Some(ws) = self.0.get(&from) {
			for (&sym, &weight) in ws {
				let score = rng.random::<f64>().powf(1.0 / weight as f64);
				if score > best {
					best = score;
					next = sym;
				}
			}
		}
		next
	}

	/// Generates a chain through the transition table, calling the
	/// given function with each generated symbol. If the function
	/// returns an error, generation stops and it is returned.
	pub fn gen_chain<R, F, E>(&self, rng: &mut R, mut f: F) -> Result<(), E>
	where
		R: Rng,
		F: FnMut(Symbol) -> Result<(), E>,
	{
		self.gen_reduced_chain(rng, |sym| {
			f(sym)?;
			Ok(sym)
		})
	}

	/// Generates a reduced chain through the transition table. The only
	/// difference from `gen_chain` is that the function may influence
	/// the next symbol; i.e. by using some sort of reduction logic to
	/// combine symbols under higher-order language semantics (e.g.
	/// n-grams).
	///
	/// The walk starts from `Symbol::NONE` and stops when the function
	/// returns `Symbol::NONE`. A symbol with no outgoing edges samples
	/// as `Symbol::NONE`, terminating the walk rather than erroring.
	pub fn gen_reduced_chain<R, F, E>(&self, rng: &mut R, mut f: F) -> Result<(), E>
	where
		R: Rng,
		F: FnMut(Symbol) -> Result<Symbol, E>,
	{
		let mut last = Symbol::NONE;
		loop {
			let next = f(self.pick(rng, last))?;
			if next == Symbol::NONE {
				return Ok(());
			}
			last = next;
		}
	}

	/// Merges another table into a copy of this one under a symbol
	/// rewrite, returning the new copy.
	///
	/// Every edge of `other` is added with its weight under the rewrite
	/// map; symbols absent from the map keep their handle. Neither input
	/// is modified.
	pub fn merge(&self, other: &Trans, rewrite: &HashMap<Symbol, Symbol>) -> Trans {
		let renum = |sym: Symbol| rewrite.get(&sym).copied().unwrap_or(sym);
		let mut out = self.clone();
		for (&from, ws) in &other.0 {
			for (&to, &weight) in ws {
				out.add(renum(from), renum(to), weight);
			}
		}
		out
	}
}

/// One weighted successor in the serialized record format.
#[derive(Serialize, Deserialize)]
struct WeightRec {
	weight: u64,
	symbol: Symbol,
}

/// One serialized transition row: a source symbol and its successors.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransRec {
	from_sym: Symbol,
	to_sym: Vec<WeightRec>,
}

impl Serialize for Trans {
	/// Serializes the table as an ordered list of
	/// `(fromSym, [(weight, toSym), …])` records.
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let recs: Vec<TransRec> = self
			.0
			.iter()
			.map(|(&from_sym, ws)| TransRec {
				from_sym,
				to_sym: ws
					.iter()
					.map(|(&symbol, &weight)| WeightRec { weight, symbol })
					.collect(),
			})
			.collect();
		recs.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Trans {
	fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let recs: Vec<TransRec> = Vec::deserialize(deserializer)?;
		let mut out = Trans::new();
		for rec in recs {
			if rec.to_sym.is_empty() {
				continue;
			}
			let ws = out.0.entry(rec.from_sym).or_default();
			for wr in rec.to_sym {
				*ws.entry(wr.symbol).or_insert(0) += wr.weight;
			}
		}
		Ok(out)
	}
}
