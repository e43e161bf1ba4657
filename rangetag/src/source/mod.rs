//! Byte sources with possibly-unloaded regions
//!
//! Tag parsers never assume a whole file is resident. They express their needs as
//! [`ByteSource::load_range`] requests and afterwards read exclusively through
//! [`ByteSource::byte_at`]. A backend is free to fetch ranges however it likes (disk
//! seeks, HTTP range requests, ...), as long as it upholds the contract below.

mod chunks;
mod file;
mod memory;
pub(crate) mod reader;

use crate::error::Result;

pub(crate) use chunks::ChunkList;
pub use file::FileSource;
pub use memory::MemorySource;

/// A file of known size whose bytes are loaded on demand
///
/// # Contract
///
/// * [`init`](ByteSource::init) must be called exactly once before anything else; extra
///   calls are no-ops that still succeed.
/// * [`len`](ByteSource::len) fails with
///   [`ErrorKind::NotInitialized`](crate::error::ErrorKind::NotInitialized) before
///   `init` has resolved.
/// * After [`load_range`](ByteSource::load_range) resolves, every byte of the requested
///   (inclusive) range is retrievable. Requests extending past end-of-file are clamped,
///   and requests for already-resident ranges may be no-ops.
/// * [`byte_at`](ByteSource::byte_at) fails with
///   [`ErrorKind::NotLoaded`](crate::error::ErrorKind::NotLoaded) for offsets whose
///   range was never requested. Returning stale or zeroed data instead of failing is a
///   contract violation; parsers rely on the failure to detect sequencing bugs.
///
/// At most one read operation is expected to be active per source at a time. The crate
/// issues loads strictly sequentially, each await completing (and merging into the
/// backend's cache) before the next offset computation.
pub trait ByteSource {
	/// Perform one-time initialization, populating the total size
	///
	/// # Errors
	///
	/// The backend could not determine the source's size (Ex. an I/O failure)
	fn init(&mut self) -> Result<()>;

	/// The total size of the source in bytes
	///
	/// # Errors
	///
	/// [`init`](ByteSource::init) has not been called
	fn len(&self) -> Result<u64>;

	/// Make the inclusive byte range `[start, end]` available for reading
	///
	/// # Errors
	///
	/// The underlying transport failed
	fn load_range(&mut self, start: u64, end: u64) -> Result<()>;

	/// Read a single byte from a previously loaded range
	///
	/// # Errors
	///
	/// `offset` lies outside every loaded range
	fn byte_at(&self, offset: u64) -> Result<u8>;
}
