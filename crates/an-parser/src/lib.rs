pub mod context;
pub mod error;
mod extractor;
mod file_check;
mod registry;

pub use context::{build_context, extract_imports, DEFAULT_WINDOW};
pub use extractor::{extract_units, parse_file, parse_source, ParseOutput, SyntaxNode};
pub use file_check::{check_file_size, check_source, is_binary, MAX_FILE_SIZE};
pub use registry::ParserRegistry;
