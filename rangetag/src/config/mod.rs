//! Various configuration options to control parsing behavior

mod parse_options;

pub use parse_options::{ParseOptions, ParsingMode};
