//! Front-matter parsing from markdown documents.

mod parser;
mod types;

pub use parser::{parse, span, FrontmatterParseError};
pub use types::{Frontmatter, ParsedDocument};
