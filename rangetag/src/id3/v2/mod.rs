//! ID3v2 items and utilities
//!
//! # Format notes
//!
//! Three major versions are in circulation, and they differ at the frame level:
//! ID3v2.2 uses 6 byte frame headers (3 byte ids, 24-bit sizes), while ID3v2.3 and
//! ID3v2.4 use 10 byte headers (4 byte ids, 32-bit sizes plus two flag bytes).
//! ID3v2.4 additionally encodes its size fields as [synchsafe
//! integers](util::synchsafe).
//!
//! Tags with a major version above 4 decode to an empty result with the version
//! `">2.4"` rather than erroring.

pub(crate) mod frame;
pub(crate) mod header;
pub(crate) mod read;
pub mod util;

/// Shortcut aliases, the v2.3/v2.4 id first and the v2.2 id as the fallback
pub(crate) const SHORTCUTS: &[(&str, &[&str])] = &[
	("title", &["TIT2", "TT2"]),
	("artist", &["TPE1", "TP1"]),
	("album", &["TALB", "TAL"]),
	("year", &["TYER", "TYE"]),
	("comment", &["COMM", "COM"]),
	("track", &["TRCK", "TRK"]),
	("genre", &["TCON", "TCO"]),
	("picture", &["APIC", "PIC"]),
	("lyrics", &["USLT", "ULT"]),
];
