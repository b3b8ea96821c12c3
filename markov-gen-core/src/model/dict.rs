use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A symbolicated string in some dictionary.
///
/// Symbols are opaque integer handles. Handle `0` is reserved as the
/// empty string, the chain terminator and the "no predecessor" sentinel
/// all at once; it is never a regular vocabulary entry.
#[derive(Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(transparent)]
pub struct Symbol(u32);

/// The group separator symbol, used to signal paragraphs.
const GS_STR: &str = "\u{1d}";

/// The end-of-document symbol.
const EOF_STR: &str = "\u{1a}";

/// Strings bound to the reserved handles of every dictionary. Because
/// they occupy the same handle in every instance, they never require
/// renumbering on merge.
const RESERVED: [&str; 6] = ["", GS_STR, EOF_STR, ".", "!", "?"];

impl Symbol {
	/// The empty string / chain terminator / no-predecessor sentinel.
	pub const NONE: Symbol = Symbol(0);

	/// The group separator symbol, used to signal paragraphs.
	pub const GS: Symbol = Symbol(1);

	/// The end-of-document symbol.
	pub const EOF: Symbol = Symbol(2);
}

impl From<u32> for Symbol {
	fn from(raw: u32) -> Self {
		Symbol(raw)
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// Maps between `Symbol`s and strings, allowing for lower memory usage.
///
/// # Responsibilities
/// - Intern strings into sequential integer handles
/// - Resolve handles back to strings, degrading gracefully on
///   undefined handles
/// - Merge with another dictionary, producing a symbol rewrite map
///
/// # Invariants
/// - `add` is idempotent; the mapping only grows for the lifetime of
///   a dictionary
/// - Handle `0` always resolves to the empty string
/// - The reserved control symbols occupy the same handles in every
///   dictionary
///
/// Not safe for concurrent mutation; callers must serialize access to
/// a given instance.
#[derive(Clone, Debug)]
pub struct Dict {
	str2sym: HashMap<String, Symbol>,
	sym2str: Vec<String>,
}

impl Dict {
	/// Creates a new dictionary with the reserved symbols defined.
	pub fn new() -> Self {
		let mut dict = Dict {
			str2sym: HashMap::with_capacity(RESERVED.len()),
			sym2str: Vec::with_capacity(RESERVED.len()),
		};
		for str in RESERVED {
			dict.add(str);
		}
		dict
	}

	/// Returns the number of defined symbols in the dictionary.
	pub fn len(&self) -> usize {
		self.sym2str.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sym2str.is_empty()
	}

	/// Adds a string, returning its `Symbol`.
	///
	/// Returns the existing handle if the string was seen before;
	/// otherwise allocates the next sequential handle. Always succeeds.
	pub fn add(&mut self, str: &str) -> Symbol {
		if let Some(&sym) = self.str2sym.get(str) {
			return sym;
		}
		let sym = Symbol(self.sym2str.len() as u32);
		self.sym2str.push(str.to_owned());
		self.str2sym.insert(str.to_owned(), sym);
		sym
	}

	/// Gets any defined symbol for the given string.
	pub fn get_sym(&self, str: &str) -> Option<Symbol> {
		self.str2sym.get(str).copied()
	}

	/// Looks up a `Symbol`, returning its string if defined.
	pub fn get(&self, sym: Symbol) -> Option<&str> {
		self.sym2str.get(sym.0 as usize).map(String::as_str)
	}

	/// Turns a `Symbol` into a string; if the symbol isn't defined, a
	/// `?+HEX` placeholder is returned. Never fails, so that stale or
	/// foreign symbol references cannot crash rendering.
	pub fn to_string(&self, sym: Symbol) -> String {
		match self.get(sym) {
			Some(str) => str.to_owned(),
			None => format!("?+{:X}", sym.0),
		}
	}

	/// Iterates all defined symbols in handle order.
	///
	/// The order is explicit so that callers picking values out of the
	/// dictionary behave reproducibly.
	pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
		self.sym2str
			.iter()
			.enumerate()
			.map(|(isym, str)| (Symbol(isym as u32), str.as_str()))
	}

	/// Merges another dictionary into a copy of this dictionary,
	/// returning the rewrite map and the new merged copy.
	///
	/// For every symbol of `other` holding the identical string at the
	/// identical handle, the handle is kept as-is and stays absent from
	/// the rewrite map. Every other symbol is appended to the copy under
	/// a fresh handle, recorded in the rewrite map as old → new. The
	/// reserved symbols coincide across dictionaries and thus always
	/// take the identity branch.
	///
	/// Neither input is modified.
	pub fn merge(&self, other: &Dict) -> (HashMap<Symbol, Symbol>, Dict) {
		let mut rewrite = HashMap::new();
		for (isym, other_str) in other.sym2str.iter().enumerate() {
			let sym = Symbol(isym as u32);
			match self.get(sym) {
				Some(my_str) if my_str == other_str => {}
				_ => {
					rewrite.insert(sym, sym);
				}
			}
		}

		let mut out = self.clone();
		out.sym2str.reserve(rewrite.len());
		for (isym, str) in other.sym2str.iter().enumerate() {
			let sym = Symbol(isym as u32);
			if rewrite.contains_key(&sym) {
				let new_sym = Symbol(out.sym2str.len() as u32);
				rewrite.insert(sym, new_sym);
				out.sym2str.push(str.clone());
				out.str2sym.insert(str.clone(), new_sym);
			}
		}

		(rewrite, out)
	}
}

impl Default for Dict {
	fn default() -> Self {
		Dict::new()
	}
}

impl Serialize for Dict {
	/// Serializes the dictionary as its `{string: symbol}` map.
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.str2sym.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Dict {
	/// Rebuilds the reverse index from the `{string: symbol}` map.
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let str2sym: HashMap<String, Symbol> = HashMap::deserialize(deserializer)?;
		let len = str2sym
			.values()
			.map(|sym| sym.0 as usize + 1)
			.max()
			.unwrap_or(0);
		if len > u32::MAX as usize {
			return Err(D::Error::custom("symbol handle out of range"));
		}
		let mut sym2str = vec![String::new(); len];
		for (str, sym) in &str2sym {
			sym2str[sym.0 as usize] = str.clone();
		}
		Ok(Dict { str2sym, sym2str })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_is_idempotent() {
		let mut dict = Dict::new();
		let cat = dict.add("cat");
		assert_eq!(cat, dict.add("cat"));
		assert_eq!(dict.get(cat), Some("cat"));
		assert_eq!(dict.get_sym("cat"), Some(cat));
	}

	#[test]
	fn reserved_symbols_are_fixed() {
		let dict = Dict::new();
		assert_eq!(dict.get(Symbol::NONE), Some(""));
		assert_eq!(dict.get(Symbol::GS), Some("\u{1d}"));
		assert_eq!(dict.get(Symbol::EOF), Some("\u{1a}"));
		assert_eq!(dict.get_sym("."), Some(Symbol::from(3)));
		assert_eq!(dict.get_sym("!"), Some(Symbol::from(4)));
		assert_eq!(dict.get_sym("?"), Some(Symbol::from(5)));
		assert_eq!(dict.len(), 6);
	}

	#[test]
	fn undefined_symbol_degrades_to_placeholder() {
		let dict = Dict::new();
		assert_eq!(dict.to_string(Symbol::from(42)), "?+2A");
	}

	#[test]
	fn iteration_follows_handle_order() {
		let mut dict = Dict::new();
		dict.add("b");
		dict.add("a");
		let syms: Vec<u32> = dict.iter().map(|(sym, _)| sym.0).collect();
		assert_eq!(syms, (0..dict.len() as u32).collect::<Vec<_>>());
	}

	#[test]
	fn merge_identical_dicts_is_identity() {
		let mut dict = Dict::new();
		dict.add("cat");
		let (rewrite, merged) = dict.merge(&dict.clone());
		assert!(rewrite.is_empty());
		assert_eq!(merged.len(), dict.len());
	}

	#[test]
	fn merge_renumbers_colliding_handles() {
		// Same handle, different strings: must not be treated as shared.
		let mut d1 = Dict::new();
		let cat = d1.add("cat");
		let mut d2 = Dict::new();
		let dog = d2.add("dog");
		assert_eq!(cat, dog);

		let (rewrite, merged) = d1.merge(&d2);
		let new_dog = rewrite[&dog];
		assert_ne!(new_dog, cat);
		assert_eq!(merged.get(cat), Some("cat"));
		assert_eq!(merged.get(new_dog), Some("dog"));
		// inputs untouched
		assert_eq!(d1.len(), 7);
		assert_eq!(d2.len(), 7);
	}

	#[test]
	fn serde_round_trip() {
		let mut dict = Dict::new();
		dict.add("hello");
		dict.add("world");
		let json = serde_json::to_string(&dict).unwrap();
		let back: Dict = serde_json::from_str(&json).unwrap();
		assert_eq!(back.len(), dict.len());
		assert_eq!(back.get_sym("hello"), dict.get_sym("hello"));
		assert_eq!(back.get_sym("world"), dict.get_sym("world"));
		assert_eq!(back.get(Symbol::NONE), Some(""));
	}
}
