/// The parsing strictness mode
///
/// This can be set with [`Probe::options`](crate::probe::Probe::options).
///
/// # Examples
///
/// ```rust,no_run
/// use rangetag::config::{ParseOptions, ParsingMode};
/// use rangetag::probe::Probe;
/// use rangetag::source::FileSource;
///
/// # fn main() -> rangetag::error::Result<()> {
/// // We only want to read spec-compliant inputs
/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
/// let tag = Probe::new(FileSource::open("foo.mp3")?)
/// 	.options(parsing_options)
/// 	.read()?;
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// ## Examples of behavior
	///
	/// * Unable to decode a frame's text - The parser will error and the entire input
	///   is discarded
	/// * A frame's declared size is nonsensical - The parser will error and the entire
	///   input is discarded
	Strict,
	/// Default mode, less eager to error on recoverably malformed input
	///
	/// Real-world files routinely carry minor spec violations; this mode skips the
	/// offending frame/atom/block and lets the rest of the metadata surface.
	///
	/// ## Examples of behavior
	///
	/// * Unable to decode a frame's text - The frame is treated as absent and the
	///   parser moves on
	/// * A frame's declared size is nonsensical - The frame is skipped where the walk
	///   can still continue
	#[default]
	BestAttempt,
}

/// Options to control how files are parsed
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) read_cover_art: bool,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	///     read_cover_art: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use rangetag::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			read_cover_art: true,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use rangetag::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// Whether or not to decode embedded cover art
	///
	/// # Examples
	///
	/// ```rust
	/// use rangetag::config::ParseOptions;
	///
	/// // By default, `read_cover_art` is enabled. Here, we don't need the images.
	/// let parsing_options = ParseOptions::new().read_cover_art(false);
	/// ```
	pub fn read_cover_art(&mut self, read_cover_art: bool) -> Self {
		self.read_cover_art = read_cover_art;
		*self
	}
}
