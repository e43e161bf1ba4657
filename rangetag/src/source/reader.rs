use super::ByteSource;
use crate::error::Result;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::try_vec;
use crate::util::text::{DecodeTextResult, TextEncoding, decode_text, latin1_decode};

use byteorder::{BigEndian, ByteOrder};

/// Typed reads at arbitrary offsets of an already-loaded [`ByteSource`]
///
/// Every method is a pure function of the source's loaded bytes; reading an offset
/// that was never loaded propagates the source's `NotLoaded` error.
pub(crate) struct SourceReader<'a> {
	source: &'a dyn ByteSource,
}

impl<'a> SourceReader<'a> {
	pub(crate) fn new(source: &'a dyn ByteSource) -> Self {
		Self { source }
	}

	pub(crate) fn u8_at(&self, offset: u64) -> Result<u8> {
		self.source.byte_at(offset)
	}

	pub(crate) fn i8_at(&self, offset: u64) -> Result<i8> {
		Ok(self.source.byte_at(offset)? as i8)
	}

	pub(crate) fn u16_at<B: ByteOrder>(&self, offset: u64) -> Result<u16> {
		let bytes = self.array_at::<2>(offset)?;
		Ok(B::read_u16(&bytes))
	}

	pub(crate) fn i16_at<B: ByteOrder>(&self, offset: u64) -> Result<i16> {
		let bytes = self.array_at::<2>(offset)?;
		Ok(B::read_i16(&bytes))
	}

	pub(crate) fn u24_at<B: ByteOrder>(&self, offset: u64) -> Result<u32> {
		let bytes = self.array_at::<3>(offset)?;
		Ok(B::read_u24(&bytes))
	}

	pub(crate) fn u32_at<B: ByteOrder>(&self, offset: u64) -> Result<u32> {
		let bytes = self.array_at::<4>(offset)?;
		Ok(B::read_u32(&bytes))
	}

	pub(crate) fn i32_at<B: ByteOrder>(&self, offset: u64) -> Result<i32> {
		let bytes = self.array_at::<4>(offset)?;
		Ok(B::read_i32(&bytes))
	}

	/// Read an ID3v2.4 synchsafe 32-bit integer (4 bytes, 7 significant bits each)
	pub(crate) fn synchsafe_u32_at(&self, offset: u64) -> Result<u32> {
		Ok(self.u32_at::<BigEndian>(offset)?.unsynch())
	}

	/// Whether bit `bit` (mask `1 << bit`) is set in the byte at `offset`
	pub(crate) fn bit_set_at(&self, offset: u64, bit: u32) -> Result<bool> {
		Ok(self.u8_at(offset)? & (1 << bit) != 0)
	}

	pub(crate) fn bytes_at(&self, offset: u64, length: usize) -> Result<Vec<u8>> {
		let mut bytes = try_vec![0; length];
		for (i, byte) in bytes.iter_mut().enumerate() {
			*byte = self.source.byte_at(offset + i as u64)?;
		}

		Ok(bytes)
	}

	fn array_at<const N: usize>(&self, offset: u64) -> Result<[u8; N]> {
		let mut bytes = [0; N];
		for (i, byte) in bytes.iter_mut().enumerate() {
			*byte = self.source.byte_at(offset + i as u64)?;
		}

		Ok(bytes)
	}

	/// Read `length` bytes as a Latin-1 string, nulls and all
	///
	/// Frame and atom identifiers are read this way; embedded null bytes are
	/// significant there (an all-null ID3v2 frame id signals padding).
	pub(crate) fn latin1_string_at(&self, offset: u64, length: usize) -> Result<String> {
		Ok(latin1_decode(&self.bytes_at(offset, length)?))
	}

	/// Decode up to `max_length` bytes at `offset` as text
	///
	/// Stops at the encoding's null terminator when one is present. The result carries
	/// the exact byte count consumed so that reads can be chained.
	pub(crate) fn text_at(
		&self,
		offset: u64,
		max_length: usize,
		encoding: TextEncoding,
	) -> Result<DecodeTextResult> {
		let bytes = self.bytes_at(offset, max_length)?;
		decode_text(&bytes, encoding)
	}
}

#[cfg(test)]
mod tests {
	use super::SourceReader;
	use crate::source::MemorySource;
	use crate::util::text::TextEncoding;

	use byteorder::{BigEndian, LittleEndian};

	#[test_log::test]
	fn typed_reads() {
		let source = MemorySource::resident(vec![0x01, 0x02, 0x03, 0x04, 0x80, 0xFF]);
		let reader = SourceReader::new(&source);

		assert_eq!(reader.u8_at(4).unwrap(), 0x80);
		assert_eq!(reader.i8_at(4).unwrap(), -128);
		assert_eq!(reader.u16_at::<BigEndian>(0).unwrap(), 0x0102);
		assert_eq!(reader.u16_at::<LittleEndian>(0).unwrap(), 0x0201);
		assert_eq!(reader.u24_at::<BigEndian>(1).unwrap(), 0x02_0304);
		assert_eq!(reader.u32_at::<BigEndian>(0).unwrap(), 0x0102_0304);
		assert_eq!(reader.u32_at::<LittleEndian>(0).unwrap(), 0x0403_0201);
		assert!(reader.bit_set_at(4, 7).unwrap());
		assert!(!reader.bit_set_at(4, 6).unwrap());
	}

	#[test_log::test]
	fn synchsafe_read() {
		// 0x00 0x00 0x02 0x01 encodes 257
		let source = MemorySource::resident(vec![0x00, 0x00, 0x02, 0x01]);
		let reader = SourceReader::new(&source);

		assert_eq!(reader.synchsafe_u32_at(0).unwrap(), 257);
	}

	#[test_log::test]
	fn chained_text_reads() {
		let source = MemorySource::resident(b"one\0two".to_vec());
		let reader = SourceReader::new(&source);

		let first = reader.text_at(0, 7, TextEncoding::Latin1).unwrap();
		assert_eq!(first.content, "one");

		let second = reader
			.text_at(first.bytes_read as u64, 7 - first.bytes_read, TextEncoding::Latin1)
			.unwrap();
		assert_eq!(second.content, "two");
	}

	#[test_log::test]
	fn reads_past_loaded_data_fail() {
		let source = MemorySource::resident(vec![0x01, 0x02]);
		let reader = SourceReader::new(&source);

		assert!(reader.u32_at::<BigEndian>(0).is_err());
		assert!(reader.u8_at(2).is_err());
	}
}
