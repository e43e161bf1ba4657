//! Read audio metadata from sources that are not fully resident in memory.
//!
//! `rangetag` extracts ID3v1, ID3v2 (2.2/2.3/2.4), MP4/M4A `ilst`, and FLAC Vorbis
//! comment metadata. Instead of consuming a whole file, every parser asks a
//! [`ByteSource`](source::ByteSource) for exactly the byte ranges it needs, making the
//! crate usable over expensive transports (a network resource, a large local file)
//! where loading everything up front is not an option.
//!
//! # Examples
//!
//! ## Reading from a path
//!
//! ```rust,no_run
//! # fn main() -> rangetag::error::Result<()> {
//! use rangetag::read_from_path;
//!
//! let tag = read_from_path("test.mp3")?;
//!
//! println!("title: {:?}", tag.title());
//! println!("artist: {:?}", tag.artist());
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading from an in-memory buffer
//!
//! ```rust,no_run
//! # fn main() -> rangetag::error::Result<()> {
//! use rangetag::probe::Probe;
//! use rangetag::source::MemorySource;
//!
//! # let buf = Vec::new();
//! let tag = Probe::new(MemorySource::new(buf)).read()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Restricting the fields that are read
//!
//! Passing a field list skips decoding (and, where possible, loading) everything
//! else. Shortcut names expand to their format-specific ids, so `"title"` matches
//! `TIT2`, `TT2`, `©nam`, or `TITLE` depending on the file.
//!
//! ```rust,no_run
//! # fn main() -> rangetag::error::Result<()> {
//! use rangetag::probe::Probe;
//! use rangetag::source::FileSource;
//!
//! let source = FileSource::open("test.mp3")?;
//! let tag = Probe::new(source)
//! 	.tags_to_read(&["title", "picture"])
//! 	.read()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub(crate) mod macros;
pub mod picture;
pub mod probe;
pub mod source;
pub mod tag;
mod util;

pub mod flac;
pub mod id3;
pub mod mp4;

pub use crate::probe::{read_from, read_from_path};
pub use crate::tag::TagResult;

pub use util::text::TextEncoding;

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use rangetag::prelude::*;
	//! ```

	pub use crate::probe::{Probe, read_from, read_from_path};
	pub use crate::source::{ByteSource, FileSource, MemorySource};
	pub use crate::tag::{TagFormat, TagResult, TagValue};
}
