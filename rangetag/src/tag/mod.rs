//! The format-agnostic tag result
//!
//! Each parser produces a [`TagResult`]: an ordered collection of raw, format-specific
//! fields (`TIT2`, `©nam`, `TITLE`, ...) plus the format's shortcut table, which lets
//! normalized names (`title`, `artist`, ...) resolve against whatever aliases are
//! actually present.

use crate::picture::Picture;

/// The tag format a [`TagResult`] was decoded from
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TagFormat {
	/// An ID3v1.0/1.1 trailer
	Id3v1,
	/// An ID3v2.2/2.3/2.4 tag
	Id3v2,
	/// An MP4/M4A `ilst` metadata atom
	Mp4,
	/// A FLAC Vorbis comment block
	Flac,
}

impl TagFormat {
	/// The family name of the format (`"ID3"`, `"MP4"`, or `"FLAC"`)
	pub fn name(&self) -> &'static str {
		match self {
			Self::Id3v1 | Self::Id3v2 => "ID3",
			Self::Mp4 => "MP4",
			Self::Flac => "FLAC",
		}
	}

	/// The shortcut table mapping normalized names to this format's field ids
	///
	/// For each shortcut, aliases are ordered; the first one present in a tag wins.
	pub fn shortcuts(self) -> &'static [(&'static str, &'static [&'static str])] {
		match self {
			// ID3v1 fields are already stored under their normalized names
			Self::Id3v1 => &[],
			Self::Id3v2 => crate::id3::v2::SHORTCUTS,
			Self::Mp4 => crate::mp4::SHORTCUTS,
			Self::Flac => crate::flac::SHORTCUTS,
		}
	}
}

/// A language-tagged text payload (ID3v2 `COMM`/`USLT`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageText {
	/// A three letter ISO-639-2 language code
	pub language: String,
	/// The short content description
	pub description: String,
	/// The text itself
	pub text: String,
}

/// A user-defined text or URL payload (ID3v2 `TXXX`/`WXXX`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserText {
	/// The user-supplied description
	pub description: String,
	/// The value
	pub value: String,
}

/// A unique file identifier (ID3v2 `UFID`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueFileId {
	/// The owner/email of the organization responsible for the identifier
	pub owner: String,
	/// The opaque identifier, up to 64 bytes
	pub identifier: Vec<u8>,
}

/// A chapter (ID3v2 `CHAP`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
	/// The element id, unique within the tag
	pub element_id: String,
	/// The chapter start time in milliseconds
	pub start_time: u32,
	/// The chapter end time in milliseconds
	pub end_time: u32,
	/// The byte offset of the chapter start, `0xFFFF_FFFF` if unused
	pub start_offset: u32,
	/// The byte offset of the chapter end, `0xFFFF_FFFF` if unused
	pub end_offset: u32,
	/// Embedded sub-frames describing the chapter
	pub sub_frames: Vec<TagField>,
}

/// A table of contents (ID3v2 `CTOC`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOfContents {
	/// The element id, unique within the tag
	pub element_id: String,
	/// Whether this is the root of the table of contents tree
	pub top_level: bool,
	/// Whether the child elements are ordered
	pub ordered: bool,
	/// The element ids of the entries
	pub child_element_ids: Vec<String>,
	/// Embedded sub-frames describing the table of contents
	pub sub_frames: Vec<TagField>,
}

/// A track/disk position pair (MP4 `trkn`/`disk`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionPair {
	/// The position in the set
	pub number: u16,
	/// The total size of the set
	pub total: u16,
}

/// A decoded field payload
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TagValue {
	/// A text payload
	Text(String),
	/// A URL payload
	Url(String),
	/// A play counter
	Counter(u32),
	/// An unsigned integer (MP4 `uint`/`uint8` classes)
	UInt(u64),
	/// A signed integer (MP4 `int` class)
	Int(i64),
	/// An embedded picture
	Picture(Picture),
	/// A comment
	Comment(LanguageText),
	/// Unsynchronized lyrics
	Lyrics(LanguageText),
	/// A user-defined text or URL field
	UserText(UserText),
	/// A unique file identifier
	UniqueFileId(UniqueFileId),
	/// A chapter
	Chapter(Chapter),
	/// A table of contents
	TableOfContents(TableOfContents),
	/// A track/disk position pair
	Pair(PositionPair),
}

/// One decoded occurrence of a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
	/// The payload size in bytes, as declared by the container
	pub size: u32,
	/// A human readable description of the field id (`"Unknown"` when unrecognized)
	pub description: &'static str,
	/// The decoded payload, `None` when the field's type is unknown
	pub value: Option<TagValue>,
}

/// A field id together with every occurrence of it, in decode order
///
/// Formats allow the same id to appear more than once (multiple `COMM` frames with
/// different languages, for example); the occurrences accumulate here rather than
/// replacing one another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagField {
	/// The raw, format-specific field id
	pub id: String,
	/// The decoded occurrences, in the order they appeared
	pub entries: Vec<TagEntry>,
}

/// The decoded metadata of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagResult {
	pub(crate) format: TagFormat,
	pub(crate) version: String,
	pub(crate) ftyp: Option<String>,
	pub(crate) fields: Vec<TagField>,
}

macro_rules! text_accessors {
	($($name:ident),+ $(,)?) => {
		$(
			paste::paste! {
				#[doc = "The `" $name "` shortcut, resolved against this format's aliases"]
				pub fn $name(&self) -> Option<&str> {
					match self.shortcut(stringify!($name))?.value.as_ref()? {
						TagValue::Text(text) => Some(text),
						_ => None,
					}
				}
			}
		)+
	};
}

impl TagResult {
	pub(crate) fn new(format: TagFormat, version: impl Into<String>) -> Self {
		Self {
			format,
			version: version.into(),
			ftyp: None,
			fields: Vec::new(),
		}
	}

	/// The tag format the metadata was decoded from
	pub fn format(&self) -> TagFormat {
		self.format
	}

	/// The format version (`"2.4.0"`, `"1.1"`, ...)
	pub fn version(&self) -> &str {
		&self.version
	}

	/// The `ftyp` major brand, for MP4 files
	pub fn ftyp(&self) -> Option<&str> {
		self.ftyp.as_deref()
	}

	/// Every decoded field, in decode order
	pub fn fields(&self) -> &[TagField] {
		&self.fields
	}

	/// Returns the field with the exact id `id`, if present
	pub fn get(&self, id: &str) -> Option<&TagField> {
		self.fields.iter().find(|field| field.id == id)
	}

	/// Resolves a shortcut (or raw id) to its first decoded occurrence
	///
	/// The format's alias list is walked in order and the first alias present wins;
	/// when the same id occurred multiple times, the first occurrence is returned.
	/// Names not in the shortcut table fall back to an exact id lookup.
	pub fn shortcut(&self, name: &str) -> Option<&TagEntry> {
		if let Some((_, aliases)) = self
			.format
			.shortcuts()
			.iter()
			.find(|(shortcut, _)| *shortcut == name)
		{
			let field = aliases.iter().find_map(|alias| self.get(alias))?;
			return field.entries.first();
		}

		self.get(name).and_then(|field| field.entries.first())
	}

	text_accessors!(title, artist, album, year, genre);

	/// The `comment` shortcut's text
	pub fn comment(&self) -> Option<&str> {
		match self.shortcut("comment")?.value.as_ref()? {
			TagValue::Text(text) => Some(text),
			TagValue::Comment(comment) => Some(&comment.text),
			_ => None,
		}
	}

	/// The `lyrics` shortcut's text
	pub fn lyrics(&self) -> Option<&str> {
		match self.shortcut("lyrics")?.value.as_ref()? {
			TagValue::Text(text) => Some(text),
			TagValue::Lyrics(lyrics) => Some(&lyrics.text),
			_ => None,
		}
	}

	/// The `track` shortcut as a number
	///
	/// ID3v2 stores the track as text (possibly `"2/9"`), ID3v1 as a single byte, and
	/// MP4 as a position/total pair; only the position itself is returned for each.
	pub fn track(&self) -> Option<u32> {
		match self.shortcut("track")?.value.as_ref()? {
			TagValue::Counter(n) => Some(*n),
			TagValue::Pair(pair) => Some(u32::from(pair.number)),
			TagValue::Text(text) => text.split('/').next()?.trim().parse().ok(),
			_ => None,
		}
	}

	/// The `picture` shortcut
	pub fn picture(&self) -> Option<&Picture> {
		match self.shortcut("picture")?.value.as_ref()? {
			TagValue::Picture(picture) => Some(picture),
			_ => None,
		}
	}

	// Same-id occurrences accumulate; distinct ids keep their decode order.
	pub(crate) fn push(&mut self, id: String, entry: TagEntry) {
		if let Some(field) = self.fields.iter_mut().find(|field| field.id == id) {
			field.entries.push(entry);
			return;
		}

		self.fields.push(TagField {
			id,
			entries: vec![entry],
		});
	}

	pub(crate) fn push_fields(&mut self, fields: Vec<TagField>) {
		for field in fields {
			for entry in field.entries {
				self.push(field.id.clone(), entry);
			}
		}
	}
}

/// Expand a caller's requested field list against a shortcut table
///
/// Shortcut names are replaced by their aliases; anything else is assumed to already
/// be a raw field id and passes through unchanged.
pub(crate) fn expand_shortcuts(
	table: &[(&'static str, &'static [&'static str])],
	requested: &[String],
) -> Vec<String> {
	let mut expanded = Vec::with_capacity(requested.len());
	for name in requested {
		match table.iter().find(|(shortcut, _)| shortcut == name) {
			Some((_, aliases)) => expanded.extend(aliases.iter().map(|alias| String::from(*alias))),
			None => expanded.push(name.clone()),
		}
	}

	expanded
}
