//! ID3v1 items
//!
//! # Format
//!
//! An ID3v1 tag is the last 128 bytes of a file: a 3 byte `TAG` marker followed by
//! fixed-width Latin-1 fields. ID3v1.1 steals the last comment byte for a track
//! number, signalled by a null at comment offset 28 with a non-zero byte after it.
//!
//! Fields are stored in a [`TagResult`](crate::tag::TagResult) under their normalized
//! names (`title`, `artist`, ...) directly; there are no format-specific ids to alias.

pub mod constants;
pub(crate) mod read;
