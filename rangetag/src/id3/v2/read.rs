use super::frame::read::read_frames;
use super::header::TagHeader;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::source::reader::SourceReader;
use crate::source::{ByteSource, MemorySource};
use crate::id3::v2::util::synchsafe::remove_unsynchronisation;
use crate::tag::{TagFormat, TagResult, expand_shortcuts};

use byteorder::BigEndian;

pub(crate) fn read_from(
	source: &mut dyn ByteSource,
	parse_options: ParseOptions,
	tags_to_read: Option<&[String]>,
) -> Result<TagResult> {
	// The declared size is needed before the full tag region can be requested
	source.load_range(6, 9)?;
	let size = SourceReader::new(source).synchsafe_u32_at(6)?;

	// The tag size does not include the header size
	source.load_range(0, 10 + u64::from(size).saturating_sub(1))?;

	parse(source, parse_options, tags_to_read)
}

pub(crate) fn parse(
	source: &dyn ByteSource,
	parse_options: ParseOptions,
	tags_to_read: Option<&[String]>,
) -> Result<TagResult> {
	let reader = SourceReader::new(source);

	let major = reader.u8_at(3)?;
	if major > 4 {
		// An unknown future version. The frame layout can't be known, so degrade to an
		// empty tag rather than erroring.
		log::warn!("Unsupported ID3v2 version 2.{major}, not parsing frames");
		return Ok(TagResult::new(TagFormat::Id3v2, ">2.4"));
	}

	let header = TagHeader::parse(&reader)?;
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: 2.{}.{}",
		header.size,
		header.major,
		header.revision
	);

	let mut offset = 10_u64;
	if header.flags.extended_header {
		// The extended header is skipped over entirely. For v4 its length is itself
		// synchsafe-encoded; for v2/v3 the plain 32-bit length field excludes itself.
		if header.major == 4 {
			offset += u64::from(reader.synchsafe_u32_at(offset)?);
		} else {
			offset += u64::from(reader.u32_at::<BigEndian>(offset)?) + 4;
		}
	}

	let mut tag = TagResult::new(
		TagFormat::Id3v2,
		format!("2.{}.{}", header.major, header.revision),
	);

	let expanded_tags = tags_to_read.map(|tags| expand_shortcuts(super::SHORTCUTS, tags));

	let end = u64::from(header.size) + 10;

	if header.flags.unsynchronisation {
		// Frame sizes might not account for the escaping, so the entire remaining tag
		// region is restored up front; all frame offsets are then relative to the
		// restored buffer.
		let region = reader.bytes_at(offset, end.saturating_sub(offset) as usize)?;
		let restored = MemorySource::resident(remove_unsynchronisation(&region));
		let restored_end = restored.len()?;

		tag.push_fields(read_frames(
			0,
			restored_end,
			&restored,
			&header,
			expanded_tags.as_deref(),
			parse_options,
		)?);
	} else {
		tag.push_fields(read_frames(
			offset,
			end,
			source,
			&header,
			expanded_tags.as_deref(),
			parse_options,
		)?);
	}

	Ok(tag)
}
