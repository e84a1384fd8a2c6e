// Word Document Handling
//
// The E.212 list is published as a .docx file. Only the main document part
// is needed: it is extracted from the zip container and flattened into
// plain text lines for the listing parser.

mod flatten;
mod unpack;

pub use flatten::{flatten_file, flatten_line, flatten_lines};
pub use unpack::extract_entry;
