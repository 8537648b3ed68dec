pub mod xib;

pub use xib::{NibLoader, ParsedNib, ResourceParsingError};
