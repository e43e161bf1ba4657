use super::ByteSource;
use crate::error::Result;
use crate::macros::err;

/// A [`ByteSource`] over an in-memory buffer
///
/// Every byte is resident from the start, so [`load_range`](ByteSource::load_range)
/// requests are no-ops that always succeed.
///
/// # Examples
///
/// ```rust
/// # fn main() -> rangetag::error::Result<()> {
/// use rangetag::source::{ByteSource, MemorySource};
///
/// let mut source = MemorySource::new(vec![1, 2, 3]);
/// source.init()?;
///
/// assert_eq!(source.len()?, 3);
/// assert_eq!(source.byte_at(1)?, 2);
/// # Ok(()) }
/// ```
pub struct MemorySource {
	data: Vec<u8>,
	initialized: bool,
}

impl MemorySource {
	/// Create a new `MemorySource`
	pub fn new(data: Vec<u8>) -> Self {
		Self {
			data,
			initialized: false,
		}
	}

	// De-unsynchronised ID3v2 regions are re-read through a fresh source; those are
	// born initialized since there is no transport behind them.
	pub(crate) fn resident(data: Vec<u8>) -> Self {
		Self {
			data,
			initialized: true,
		}
	}
}

impl ByteSource for MemorySource {
	fn init(&mut self) -> Result<()> {
		self.initialized = true;
		Ok(())
	}

	fn len(&self) -> Result<u64> {
		if !self.initialized {
			err!(NotInitialized);
		}

		Ok(self.data.len() as u64)
	}

	fn load_range(&mut self, _start: u64, _end: u64) -> Result<()> {
		Ok(())
	}

	fn byte_at(&self, offset: u64) -> Result<u8> {
		match self.data.get(offset as usize) {
			Some(byte) => Ok(*byte),
			None => err!(NotLoaded(offset)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::MemorySource;
	use crate::source::ByteSource;

	#[test_log::test]
	fn size_requires_init() {
		let mut source = MemorySource::new(vec![1, 2, 3]);
		assert!(source.len().is_err());

		source.init().unwrap();
		assert_eq!(source.len().unwrap(), 3);

		// Idempotent
		source.init().unwrap();
		assert_eq!(source.len().unwrap(), 3);
	}

	#[test_log::test]
	fn out_of_bounds_read_fails() {
		let source = MemorySource::resident(vec![1, 2, 3]);
		assert!(source.byte_at(3).is_err());
	}
}
