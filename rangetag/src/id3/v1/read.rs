use super::constants::{GENRES, ID3V1_TAG_MARKER};
use crate::error::Result;
use crate::macros::decode_err;
use crate::source::ByteSource;
use crate::source::reader::SourceReader;
use crate::tag::{TagEntry, TagFormat, TagResult, TagValue};
use crate::util::text::latin1_decode;

pub(crate) fn read_from(source: &mut dyn ByteSource) -> Result<TagResult> {
	log::debug!("Reading ID3v1 tag");

	let size = source.len()?;
	if size < 128 {
		decode_err!(@BAIL Id3v1, "File is too small to contain an ID3v1 tag");
	}

	source.load_range(size - 128, size - 1)?;
	parse(source, size - 128)
}

pub(crate) fn parse(source: &dyn ByteSource, offset: u64) -> Result<TagResult> {
	let reader = SourceReader::new(source);

	if reader.bytes_at(offset, 3)? != ID3V1_TAG_MARKER {
		decode_err!(@BAIL Id3v1, "Expected a \"TAG\" marker");
	}

	let title = decode_field(&reader, offset + 3, 30)?;
	let artist = decode_field(&reader, offset + 33, 30)?;
	let album = decode_field(&reader, offset + 63, 30)?;
	let year = decode_field(&reader, offset + 93, 4)?;

	// Determine the range of the comment (30 bytes for ID3v1 and 28 for ID3v1.1).
	// ID3v1.1 nulls out comment byte 28 and stores the track number after it; a
	// track number of 0 is invalid.
	let track_flag = reader.u8_at(offset + 125)?;
	let track_number = reader.u8_at(offset + 126)?;

	let version;
	let comment;
	let track;
	if track_flag == 0 && track_number != 0 {
		version = "1.1";
		comment = decode_field(&reader, offset + 97, 28)?;
		track = Some(track_number);
	} else {
		version = "1.0";
		comment = decode_field(&reader, offset + 97, 30)?;
		track = None;
	}

	let mut tag = TagResult::new(TagFormat::Id3v1, version);

	let mut push_text = |id: &str, description, size, text: Option<String>| {
		if let Some(text) = text {
			tag.push(
				String::from(id),
				TagEntry {
					size,
					description,
					value: Some(TagValue::Text(text)),
				},
			);
		}
	};

	push_text("title", "Title", 30, title);
	push_text("artist", "Artist", 30, artist);
	push_text("album", "Album", 30, album);
	push_text("year", "Year", 4, year);
	push_text(
		"comment",
		"Comment",
		if track.is_some() { 28 } else { 30 },
		comment,
	);

	if let Some(track) = track {
		tag.push(
			String::from("track"),
			TagEntry {
				size: 1,
				description: "Track number",
				value: Some(TagValue::Counter(u32::from(track))),
			},
		);
	}

	let genre_index = reader.u8_at(offset + 127)?;
	if let Some(genre) = GENRES.get(usize::from(genre_index)) {
		tag.push(
			String::from("genre"),
			TagEntry {
				size: 1,
				description: "Genre",
				value: Some(TagValue::Text(String::from(*genre))),
			},
		);
	}

	Ok(tag)
}

fn decode_field(reader: &SourceReader<'_>, offset: u64, length: usize) -> Result<Option<String>> {
	let data = reader.bytes_at(offset, length)?;

	let mut first_null_pos = data.len();
	if let Some(null_pos) = data.iter().position(|&b| b == 0) {
		if null_pos == 0 {
			return Ok(None);
		}

		if data[null_pos..].iter().any(|b| *b != b'\0') {
			log::warn!("ID3v1 text field contains trailing junk, skipping");
		}

		first_null_pos = null_pos;
	}

	Ok(Some(latin1_decode(&data[..first_null_pos])))
}
