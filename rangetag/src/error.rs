//! Contains the errors that can arise within rangetag
//!
//! The primary error is [`RangetagError`]. The type of error is determined by
//! [`ErrorKind`], which can be extended at any time.

use crate::tag::TagFormat;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, RangetagError>`
pub type Result<T> = std::result::Result<T, RangetagError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Byte source sequencing errors
	/// A [`ByteSource`](crate::source::ByteSource) was queried before `init` resolved
	NotInitialized,
	/// A byte was requested from an offset that was never loaded
	///
	/// This is the mechanism by which parsers detect that more data is needed, and it
	/// is always a sequencing error when it escapes the crate.
	NotLoaded(u64),

	// Format detection errors
	/// No registered tag reader recognized the input
	NoSuitableReader,

	// File data errors
	/// A section the format requires is absent (Ex. a FLAC stream with no Vorbis comment block)
	MissingRequiredBlock(&'static str),
	/// Expected the data to be a different size than provided
	///
	/// This occurs when the size of an item is written as one value, but that size is either too
	/// big or small to be valid within the bounds of that item.
	SizeMismatch,
	/// Attempting to read an abnormally large amount of data
	TooMuchData,
	/// Errors that occur while decoding a tag
	TagDecoding(TagDecodingError),
	/// Errors that arise while decoding text
	TextDecode(&'static str),

	// Conversions for external errors
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Unable to convert UTF-16 words to a String
	StringFromUtf16(std::string::FromUtf16Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// An error that arises while decoding a tag
pub struct TagDecodingError {
	format: Option<TagFormat>,
	description: &'static str,
}

impl TagDecodingError {
	/// Create a `TagDecodingError` from a [`TagFormat`] and description
	#[must_use]
	pub const fn new(format: TagFormat, description: &'static str) -> Self {
		Self {
			format: Some(format),
			description,
		}
	}

	/// Create a `TagDecodingError` without binding it to a [`TagFormat`]
	pub fn from_description(description: &'static str) -> Self {
		Self {
			format: None,
			description,
		}
	}

	/// Returns the associated [`TagFormat`], if one exists
	pub fn format(&self) -> Option<TagFormat> {
		self.format
	}

	/// Returns the error description
	pub fn description(&self) -> &str {
		self.description
	}
}

impl Debug for TagDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {:?}", format, self.description)
		} else {
			write!(f, "{:?}", self.description)
		}
	}
}

impl Display for TagDecodingError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(format) = self.format {
			write!(f, "{:?}: {}", format, self.description)
		} else {
			write!(f, "{}", self.description)
		}
	}
}

/// Errors that could occur within rangetag
pub struct RangetagError {
	pub(crate) kind: ErrorKind,
}

impl RangetagError {
	/// Create a `RangetagError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use rangetag::error::{ErrorKind, RangetagError};
	///
	/// let no_reader = RangetagError::new(ErrorKind::NoSuitableReader);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use rangetag::error::{ErrorKind, RangetagError};
	///
	/// let no_reader = RangetagError::new(ErrorKind::NoSuitableReader);
	/// if let ErrorKind::NoSuitableReader = no_reader.kind() {
	/// 	println!("What's the format?");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for RangetagError {}

impl Debug for RangetagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<TagDecodingError> for RangetagError {
	fn from(input: TagDecodingError) -> Self {
		Self {
			kind: ErrorKind::TagDecoding(input),
		}
	}
}

impl From<std::io::Error> for RangetagError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for RangetagError {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<std::string::FromUtf16Error> for RangetagError {
	fn from(input: std::string::FromUtf16Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf16(input),
		}
	}
}

impl From<TryReserveError> for RangetagError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl Display for RangetagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::StringFromUtf16(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::NotInitialized => {
				write!(f, "Byte source was queried before being initialized")
			},
			ErrorKind::NotLoaded(offset) => {
				write!(f, "Offset {offset} hasn't been loaded yet")
			},
			ErrorKind::NoSuitableReader => {
				write!(f, "No tag format could be determined from the provided file")
			},
			ErrorKind::MissingRequiredBlock(block) => {
				write!(f, "File is missing a mandatory {block} block")
			},
			ErrorKind::SizeMismatch => write!(
				f,
				"Encountered an invalid item size, either too big or too small to be valid"
			),
			ErrorKind::TooMuchData => {
				write!(f, "Attempted to read an abnormally large amount of data")
			},
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TagDecoding(ref tag_decode_err) => write!(f, "{tag_decode_err}"),
		}
	}
}
