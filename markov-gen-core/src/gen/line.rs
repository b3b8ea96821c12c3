use std::io::{self, Write};

/// Accumulates words into a line buffer, flushing whole lines to the
/// underlying writer.
pub(super) struct LineGen<'a> {
	pub buf: String,
	w: &'a mut dyn Write,
}

impl<'a> LineGen<'a> {
	pub fn new(w: &'a mut dyn Write) -> Self {
		LineGen {
			buf: String::new(),
			w,
		}
	}

	pub fn flush(&mut self) -> io::Result<()> {
		if self.buf.is_empty() {
			return Ok(());
		}
		self.buf.push('\n');
		self.w.write_all(self.buf.as_bytes())?;
		self.buf.clear();
		Ok(())
	}

	/// Flushes first if adding `add` more bytes would exceed `limit`.
	pub fn flush_if_exceeds(&mut self, add: usize, limit: usize) -> io::Result<()> {
		let n = self.buf.len();
		if n == 0 || n + add <= limit {
			return Ok(());
		}
		self.flush()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn flush_on_empty_buffer_writes_nothing() {
		let mut out = Vec::new();
		let mut lg = LineGen::new(&mut out);
		lg.flush().unwrap();
		assert!(out.is_empty());
	}

	#[test]
	fn flush_terminates_the_line() {
		let mut out = Vec::new();
		let mut lg = LineGen::new(&mut out);
		lg.buf.push_str("hello");
		lg.flush().unwrap();
		assert_eq!(out, b"hello\n");
	}

	#[test]
	fn flush_if_exceeds_breaks_long_lines() {
		let mut out = Vec::new();
		let mut lg = LineGen::new(&mut out);
		lg.buf.push_str("0123456789");
		lg.flush_if_exceeds(5, 12).unwrap();
		// under the limit nothing happens
		lg.buf.push_str("ab");
		lg.flush_if_exceeds(5, 12).unwrap();
		assert_eq!(lg.buf, "ab");
		drop(lg);
		assert_eq!(out, b"0123456789\n");
	}
}
