use crate::error::{ErrorKind, RangetagError, Result};
use crate::macros::err;

/// The text encoding used by a tag's string fields
///
/// The discriminants of the first four variants match the encoding ids used in ID3v2
/// frames. [`TextEncoding::UTF16LE`] never appears on the wire as an id; it exists for
/// callers that know the byte order of BOM-less UTF-16 data.
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
	/// UTF-16 little endian
	UTF16LE = 4,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// The encoding an ID3v2 frame declares in its leading byte
	///
	/// Frames written by non-compliant encoders occasionally carry an out of range id,
	/// which is treated as Latin-1.
	pub(crate) fn from_id3v2_byte(byte: u8) -> Self {
		Self::from_u8(byte).unwrap_or(Self::Latin1)
	}
}

/// The result of decoding a bounded string field
///
/// `bytes_read` is the exact number of bytes consumed, including any byte order mark
/// and the terminator when one was found. Callers chain subsequent reads starting at
/// `offset + bytes_read`.
#[derive(Eq, PartialEq, Debug, Default)]
pub(crate) struct DecodeTextResult {
	pub(crate) content: String,
	pub(crate) bytes_read: usize,
}

impl DecodeTextResult {
	pub(crate) fn text_or_none(self) -> Option<String> {
		if self.content.is_empty() {
			return None;
		}

		Some(self.content)
	}
}

/// Decode a string field from `data`, stopping at a null terminator or the end of the
/// slice, whichever comes first
///
/// UTF-16 variants detect and consume a 2-byte BOM when present, overriding the
/// endianness implied by `encoding`. Without a BOM, [`TextEncoding::UTF16BE`] reads
/// big-endian and the other UTF-16 variants read little-endian.
pub(crate) fn decode_text(data: &[u8], encoding: TextEncoding) -> Result<DecodeTextResult> {
	match encoding {
		TextEncoding::Latin1 => {
			let (raw, bytes_read) = take_terminated(data);
			Ok(DecodeTextResult {
				content: latin1_decode(raw),
				bytes_read,
			})
		},
		TextEncoding::UTF8 => {
			let mut start = 0;
			if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
				start = 3;
			}

			let (raw, consumed) = take_terminated(&data[start..]);
			let content = String::from_utf8(raw.to_vec())
				.map_err(|_| RangetagError::new(ErrorKind::TextDecode("Expected a UTF-8 string")))?;

			Ok(DecodeTextResult {
				content,
				bytes_read: start + consumed,
			})
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE | TextEncoding::UTF16LE => {
			utf16_decode_terminated(data, encoding)
		},
	}
}

// Cuts `data` at the first null byte, consuming the terminator
fn take_terminated(data: &[u8]) -> (&[u8], usize) {
	match data.iter().position(|b| *b == 0) {
		Some(null_pos) => (&data[..null_pos], null_pos + 1),
		None => (data, data.len()),
	}
}

fn utf16_decode_terminated(data: &[u8], encoding: TextEncoding) -> Result<DecodeTextResult> {
	let mut big_endian = encoding == TextEncoding::UTF16BE;
	let mut ix = 0;

	match data {
		[0xFE, 0xFF, ..] => {
			big_endian = true;
			ix = 2;
		},
		[0xFF, 0xFE, ..] => {
			big_endian = false;
			ix = 2;
		},
		_ => {},
	}

	let mut words = Vec::new();
	while ix + 1 < data.len() {
		let word = if big_endian {
			u16::from_be_bytes([data[ix], data[ix + 1]])
		} else {
			u16::from_le_bytes([data[ix], data[ix + 1]])
		};
		ix += 2;

		if word == 0x0000 {
			break;
		}

		words.push(word);
	}

	let content = String::from_utf16(&words)
		.map_err(|_| RangetagError::new(ErrorKind::TextDecode("Given an invalid UTF-16 string")))?;

	Ok(DecodeTextResult {
		content,
		bytes_read: ix,
	})
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	bytes.iter().map(|c| *c as char).collect::<String>()
}

pub(crate) fn utf8_decode_str(bytes: &[u8]) -> Result<&str> {
	match std::str::from_utf8(bytes) {
		Ok(text) => Ok(text),
		Err(_) => err!(TextDecode("Expected a UTF-8 string")),
	}
}

#[cfg(test)]
mod tests {
	use super::{DecodeTextResult, TextEncoding, decode_text};

	#[test_log::test]
	fn latin1_terminated() {
		let data = b"Foo\0junk";
		let decoded = decode_text(data, TextEncoding::Latin1).unwrap();

		// The terminator is consumed, the junk is not
		assert_eq!(
			decoded,
			DecodeTextResult {
				content: String::from("Foo"),
				bytes_read: 4,
			}
		);
	}

	#[test_log::test]
	fn latin1_unterminated() {
		let decoded = decode_text(b"Foo", TextEncoding::Latin1).unwrap();
		assert_eq!(decoded.content, "Foo");
		assert_eq!(decoded.bytes_read, 3);
	}

	#[test_log::test]
	fn latin1_high_bytes() {
		let decoded = decode_text(&[0x46, 0xF6, 0xF6], TextEncoding::Latin1).unwrap();
		assert_eq!(decoded.content, "Föö");
	}

	#[test_log::test]
	fn utf16_boms() {
		// The BOM decides the byte order, regardless of the encoding hint
		let be = [0xFE, 0xFF, 0x00, 0x46, 0x00, 0x6F];
		let le = [0xFF, 0xFE, 0x46, 0x00, 0x6F, 0x00];

		for data in [&be, &le] {
			let decoded = decode_text(data, TextEncoding::UTF16).unwrap();
			assert_eq!(decoded.content, "Fo");
			assert_eq!(decoded.bytes_read, 6);
		}
	}

	#[test_log::test]
	fn utf16_terminator_word() {
		let data = [0xFF, 0xFE, 0x46, 0x00, 0x00, 0x00, 0x6F, 0x00];
		let decoded = decode_text(&data, TextEncoding::UTF16).unwrap();

		assert_eq!(decoded.content, "F");
		assert_eq!(decoded.bytes_read, 6);
	}

	#[test_log::test]
	fn utf16be_without_bom() {
		let data = [0x00, 0x46, 0x00, 0x6F, 0x00, 0x6F];
		let decoded = decode_text(&data, TextEncoding::UTF16BE).unwrap();
		assert_eq!(decoded.content, "Foo");
	}

	#[test_log::test]
	fn utf8_bom_skipped() {
		let data = b"\xEF\xBB\xBFFoo";
		let decoded = decode_text(data, TextEncoding::UTF8).unwrap();
		assert_eq!(decoded.content, "Foo");
		assert_eq!(decoded.bytes_read, 6);
	}
}
