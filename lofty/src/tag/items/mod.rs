//! Various generic representations of tag items

mod lang;
pub mod popularimeter;
mod timestamp;

pub use lang::*;
pub use timestamp::Timestamp;
