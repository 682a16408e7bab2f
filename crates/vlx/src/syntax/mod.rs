//! VLX text syntax
//!
//! Loading text is [`parse`] then [`link`]; writing is [`print`]. The
//! serialization core only ever sees linked documents.

pub mod lexer;
pub mod linker;
pub mod parser;
pub mod printer;

pub use linker::link;
pub use parser::{parse, Parsed, Parser};
pub use printer::{print, Printer};

use crate::serialization::Result;

/// Parse and link `source`
pub fn parse_linked(source: &str) -> Result<Parsed> {
    let mut parsed = parse(source)?;
    link(&mut parsed.document)?;
    Ok(parsed)
}
