use crate::error::Result;
use crate::source::reader::SourceReader;

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TagFlags {
	/// Whether the entire tag's content is unsynchronised
	pub(crate) unsynchronisation: bool,
	/// Whether an extended header follows the tag header
	pub(crate) extended_header: bool,
	/// Indicates the tag is in an experimental stage
	pub(crate) experimental: bool,
	/// Indicates the tag is followed by a footer (ID3v2.4 only)
	pub(crate) footer: bool,
}

/// The first 10 bytes of an ID3v2 tag
///
/// Parsed once per file and immutable afterwards; the frame walker consults it to
/// select the frame header width and size encoding.
#[derive(Copy, Clone, Debug)]
pub(crate) struct TagHeader {
	pub(crate) major: u8,
	pub(crate) revision: u8,
	pub(crate) flags: TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE 10 BYTE HEADER**)
	pub(crate) size: u32,
}

impl TagHeader {
	/// Decode the header at the start of `reader`
	///
	/// The caller is expected to have short-circuited majors above 4 already.
	pub(crate) fn parse(reader: &SourceReader<'_>) -> Result<Self> {
		let major = reader.u8_at(3)?;
		let revision = reader.u8_at(4)?;

		let flags = TagFlags {
			unsynchronisation: reader.bit_set_at(5, 7)?,
			extended_header: reader.bit_set_at(5, 6)?,
			experimental: reader.bit_set_at(5, 5)?,
			footer: major == 4 && reader.bit_set_at(5, 4)?,
		};

		let size = reader.synchsafe_u32_at(6)?;

		Ok(Self {
			major,
			revision,
			flags,
			size,
		})
	}

	/// The width of one frame header under this tag's version
	pub(crate) fn frame_header_size(&self) -> u64 {
		if self.major == 2 { 6 } else { 10 }
	}
}
