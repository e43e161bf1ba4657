use crate::error::Result;
use crate::macros::err;

/// One contiguous loaded region of a file
struct Chunk {
	offset: u64,
	data: Vec<u8>,
}

impl Chunk {
	/// The offset of the last byte covered by this chunk (inclusive)
	fn end(&self) -> u64 {
		self.offset + self.data.len() as u64 - 1
	}
}

/// Tracks which byte ranges of a file are resident in memory
///
/// The chunk list is the sole authority for "what is currently loaded". Chunks are
/// kept in strictly ascending order, and are never overlapping or byte-adjacent;
/// [`ChunkList::add_data`] merges any insertion that would violate that into a single
/// chunk.
///
/// Lookups are linear scans. The number of distinct loaded regions per file is a
/// handful in practice, so an interval tree would buy nothing here.
#[derive(Default)]
pub(crate) struct ChunkList {
	chunks: Vec<Chunk>,
}

impl ChunkList {
	pub(crate) fn new() -> Self {
		Self { chunks: Vec::new() }
	}

	/// Insert `data` as covering `[offset, offset + data.len() - 1]`
	///
	/// Any existing chunks that overlap or are byte-adjacent to the new range are
	/// spliced out and replaced by one merged chunk: the prefix of the first overlapped
	/// chunk lying before the new data, the new data itself, and the suffix of the last
	/// overlapped chunk lying after it. New data wins wherever ranges overlap.
	pub(crate) fn add_data(&mut self, offset: u64, data: Vec<u8>) {
		if data.is_empty() {
			return;
		}

		let new_end = offset + data.len() as u64 - 1;

		// Index of the first chunk that is not strictly before the new range
		// (`chunk.end() + 1 >= offset` keeps byte-adjacent chunks in the span)
		let first = self
			.chunks
			.iter()
			.position(|chunk| chunk.end() + 1 >= offset)
			.unwrap_or(self.chunks.len());

		// Chunks from `first` remain part of the span while they start at or before
		// one byte past the new range
		let mut last = first;
		while last < self.chunks.len() && self.chunks[last].offset <= new_end + 1 {
			last += 1;
		}

		if first == last {
			// No collision, plain sorted insert
			self.chunks.insert(first, Chunk { offset, data });
			return;
		}

		let span_first = &self.chunks[first];
		let span_last = &self.chunks[last - 1];

		let merged_offset = span_first.offset.min(offset);
		let mut merged = Vec::with_capacity(data.len());

		if span_first.offset < offset {
			merged.extend_from_slice(&span_first.data[..(offset - span_first.offset) as usize]);
		}

		merged.extend_from_slice(&data);

		if span_last.end() > new_end {
			merged.extend_from_slice(&span_last.data[(new_end + 1 - span_last.offset) as usize..]);
		}

		self.chunks.splice(
			first..last,
			std::iter::once(Chunk {
				offset: merged_offset,
				data: merged,
			}),
		);
	}

	/// Whether a single stored chunk fully covers `[start, end]` (inclusive)
	///
	/// Coverage split across two chunks with a gap between them returns `false`; a
	/// caller must have issued one `add_data` spanning the full requested range.
	pub(crate) fn has_data_range(&self, start: u64, end: u64) -> bool {
		for chunk in &self.chunks {
			if end < chunk.offset {
				return false;
			}

			if start >= chunk.offset && end <= chunk.end() {
				return true;
			}
		}

		false
	}

	/// Read the byte at `offset`, failing loudly when it was never loaded
	pub(crate) fn byte_at(&self, offset: u64) -> Result<u8> {
		for chunk in &self.chunks {
			if offset >= chunk.offset && offset <= chunk.end() {
				return Ok(chunk.data[(offset - chunk.offset) as usize]);
			}
		}

		err!(NotLoaded(offset))
	}

	#[cfg(test)]
	fn chunk_count(&self) -> usize {
		self.chunks.len()
	}
}

#[cfg(test)]
mod tests {
	use super::ChunkList;

	fn filled(len: usize, value: u8) -> Vec<u8> {
		vec![value; len]
	}

	#[test_log::test]
	fn add_data_is_idempotent() {
		let mut chunks = ChunkList::new();
		chunks.add_data(50, filled(10, 1));
		chunks.add_data(50, filled(10, 1));

		assert_eq!(chunks.chunk_count(), 1);
		for offset in 50..60 {
			assert_eq!(chunks.byte_at(offset).unwrap(), 1);
		}
	}

	#[test_log::test]
	fn disjoint_chunks_stay_separate() {
		let mut chunks = ChunkList::new();
		chunks.add_data(100, filled(10, 1));
		chunks.add_data(0, filled(10, 2));

		assert_eq!(chunks.chunk_count(), 2);
		assert!(chunks.has_data_range(0, 9));
		assert!(chunks.has_data_range(100, 109));
		assert!(!chunks.has_data_range(0, 109));
	}

	#[test_log::test]
	fn adjacent_chunks_merge() {
		let mut chunks = ChunkList::new();
		chunks.add_data(0, filled(10, 1));
		chunks.add_data(10, filled(10, 2));

		assert_eq!(chunks.chunk_count(), 1);
		assert!(chunks.has_data_range(0, 19));
		assert_eq!(chunks.byte_at(9).unwrap(), 1);
		assert_eq!(chunks.byte_at(10).unwrap(), 2);
	}

	#[test_log::test]
	fn overlapping_chunk_is_overwritten_by_new_data() {
		let mut chunks = ChunkList::new();
		chunks.add_data(0, filled(10, 1));
		chunks.add_data(5, filled(10, 2));

		assert_eq!(chunks.chunk_count(), 1);
		assert!(chunks.has_data_range(0, 14));
		assert_eq!(chunks.byte_at(4).unwrap(), 1);
		assert_eq!(chunks.byte_at(5).unwrap(), 2);
		assert_eq!(chunks.byte_at(14).unwrap(), 2);
	}

	#[test_log::test]
	fn insertion_spanning_multiple_chunks_keeps_prefix_and_suffix() {
		let mut chunks = ChunkList::new();
		chunks.add_data(0, filled(10, 1));
		chunks.add_data(20, filled(10, 2));
		chunks.add_data(40, filled(10, 3));

		// Covers the tail of the first chunk through the head of the last
		chunks.add_data(5, filled(40, 4));

		assert_eq!(chunks.chunk_count(), 1);
		assert!(chunks.has_data_range(0, 49));
		assert_eq!(chunks.byte_at(4).unwrap(), 1);
		assert_eq!(chunks.byte_at(5).unwrap(), 4);
		assert_eq!(chunks.byte_at(44).unwrap(), 4);
		assert_eq!(chunks.byte_at(45).unwrap(), 3);
	}

	#[test_log::test]
	fn coverage_is_independent_of_insertion_order() {
		let ranges: [(u64, usize); 4] = [(0, 10), (10, 5), (15, 20), (35, 15)];

		// Any permutation whose union covers [0, 49] with no gaps must answer
		// `has_data_range(0, 49)`, regardless of insertion order
		let orders: [[usize; 4]; 4] = [[0, 1, 2, 3], [3, 2, 1, 0], [2, 0, 3, 1], [1, 3, 0, 2]];
		for order in orders {
			let mut chunks = ChunkList::new();
			for ix in order {
				let (offset, len) = ranges[ix];
				chunks.add_data(offset, filled(len, ix as u8));
			}

			assert!(chunks.has_data_range(0, 49), "failed for order {order:?}");
			assert_eq!(chunks.chunk_count(), 1);
		}
	}

	#[test_log::test]
	fn byte_round_trip() {
		let data = (0..=255).collect::<Vec<u8>>();

		let mut chunks = ChunkList::new();
		chunks.add_data(1000, data.clone());

		for (i, byte) in data.iter().enumerate() {
			assert_eq!(chunks.byte_at(1000 + i as u64).unwrap(), *byte);
		}
	}

	#[test_log::test]
	fn unloaded_offsets_fail() {
		let mut chunks = ChunkList::new();
		chunks.add_data(10, filled(10, 1));

		assert!(chunks.byte_at(9).is_err());
		assert!(chunks.byte_at(20).is_err());
		assert!(chunks.byte_at(0).is_err());
		assert!(ChunkList::new().byte_at(0).is_err());
	}
}
