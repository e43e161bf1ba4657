use super::ByteSource;
use super::chunks::ChunkList;
use crate::error::Result;
use crate::macros::{err, try_vec};

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// A [`ByteSource`] backed by a local file
///
/// Requested ranges are read with a seek + read and cached in a [`ChunkList`];
/// re-requesting a resident range performs no I/O.
///
/// # Examples
///
/// ```rust,no_run
/// # fn main() -> rangetag::error::Result<()> {
/// use rangetag::probe::Probe;
/// use rangetag::source::FileSource;
///
/// let tag = Probe::new(FileSource::open("test.flac")?).read()?;
/// # Ok(()) }
/// ```
pub struct FileSource {
	file: File,
	size: u64,
	initialized: bool,
	chunks: ChunkList,
}

impl FileSource {
	/// Create a new `FileSource` from an open [`File`]
	pub fn new(file: File) -> Self {
		Self {
			file,
			size: 0,
			initialized: false,
			chunks: ChunkList::new(),
		}
	}

	/// Open the file at `path`
	///
	/// # Errors
	///
	/// The file could not be opened
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Ok(Self::new(File::open(path)?))
	}
}

impl ByteSource for FileSource {
	fn init(&mut self) -> Result<()> {
		if self.initialized {
			return Ok(());
		}

		self.size = self.file.metadata()?.len();
		self.initialized = true;
		Ok(())
	}

	fn len(&self) -> Result<u64> {
		if !self.initialized {
			err!(NotInitialized);
		}

		Ok(self.size)
	}

	fn load_range(&mut self, start: u64, mut end: u64) -> Result<()> {
		if !self.initialized {
			err!(NotInitialized);
		}

		// Parsers walking linked structures routinely ask for one header past the
		// last block, clamp rather than fail
		if self.size == 0 || start >= self.size {
			return Ok(());
		}
		if end >= self.size {
			end = self.size - 1;
		}

		if self.chunks.has_data_range(start, end) {
			return Ok(());
		}

		let length = (end - start + 1) as usize;
		let mut data = try_vec![0; length];

		self.file.seek(SeekFrom::Start(start))?;
		self.file.read_exact(&mut data)?;

		self.chunks.add_data(start, data);
		Ok(())
	}

	fn byte_at(&self, offset: u64) -> Result<u8> {
		self.chunks.byte_at(offset)
	}
}

#[cfg(test)]
mod tests {
	use super::FileSource;
	use crate::source::ByteSource;

	use std::io::Write;

	#[test_log::test]
	fn loads_only_requested_ranges() {
		let mut file = tempfile::tempfile().unwrap();
		file.write_all(&(0..=99).collect::<Vec<u8>>()).unwrap();

		let mut source = FileSource::new(file);
		source.init().unwrap();
		assert_eq!(source.len().unwrap(), 100);

		source.load_range(10, 19).unwrap();
		assert_eq!(source.byte_at(10).unwrap(), 10);
		assert_eq!(source.byte_at(19).unwrap(), 19);

		// Outside the requested range, despite being inside the file
		assert!(source.byte_at(9).is_err());
		assert!(source.byte_at(20).is_err());
	}

	#[test_log::test]
	fn ranges_past_eof_are_clamped() {
		let mut file = tempfile::tempfile().unwrap();
		file.write_all(&[1, 2, 3, 4]).unwrap();

		let mut source = FileSource::new(file);
		source.init().unwrap();

		source.load_range(2, 100).unwrap();
		assert_eq!(source.byte_at(3).unwrap(), 4);
		assert!(source.byte_at(4).is_err());

		// Entirely past the end, a no-op
		source.load_range(50, 60).unwrap();
		assert!(source.byte_at(50).is_err());
	}
}
