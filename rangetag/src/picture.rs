//! Format-agnostic picture handling

/// The picture type, according to ID3v2 APIC
///
/// FLAC picture blocks index into the same table.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	/// Get a `u8` from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}

	/// The type name, as worded in the ID3v2 APIC specification
	pub fn name(&self) -> &'static str {
		match self {
			Self::Other => "Other",
			Self::Icon => "32x32 pixels 'file icon' (PNG only)",
			Self::OtherIcon => "Other file icon",
			Self::CoverFront => "Cover (front)",
			Self::CoverBack => "Cover (back)",
			Self::Leaflet => "Leaflet page",
			Self::Media => "Media (e.g. label side of CD)",
			Self::LeadArtist => "Lead artist/lead performer/soloist",
			Self::Artist => "Artist/performer",
			Self::Conductor => "Conductor",
			Self::Band => "Band/Orchestra",
			Self::Composer => "Composer",
			Self::Lyricist => "Lyricist/text writer",
			Self::RecordingLocation => "Recording Location",
			Self::DuringRecording => "During recording",
			Self::DuringPerformance => "During performance",
			Self::ScreenCapture => "Movie/video screen capture",
			Self::BrightFish => "A bright coloured fish",
			Self::Illustration => "Illustration",
			Self::BandLogo => "Band/artist logotype",
			Self::PublisherLogo => "Publisher/Studio logotype",
			Self::Undefined(_) => "Undefined",
		}
	}
}

/// An embedded picture
///
/// ID3v2 `APIC`/`PIC` frames, MP4 `covr` atoms, and FLAC picture blocks all decode
/// into this.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Picture {
	/// The format of the image
	///
	/// This is a MIME type (`image/jpeg`), except for ID3v2.2 `PIC` frames, which carry
	/// a fixed three letter format string (`JPG`).
	pub format: String,
	/// The picture type, where the source format records one
	///
	/// MP4 cover art has no type field.
	pub pic_type: Option<PictureType>,
	/// A short description, where the source format records one
	pub description: Option<String>,
	/// The raw image bytes
	pub data: Vec<u8>,
}
