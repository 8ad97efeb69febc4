//! Table export.

mod md;

pub use md::{write_markdown, write_markdown_to};
