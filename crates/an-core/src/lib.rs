mod dialect;
mod error;
mod language;
mod provider;
mod style;
mod unit;

pub use dialect::{
    starts_with_comment_marker, trailing_block_close, CommentDialect, DocStrategy, BLOCK_PAIRS,
    COMMENT_MARKERS,
};
pub use error::CoreError;
pub use language::{is_supported_file, Language, SUPPORTED_EXTENSIONS};
pub use provider::{CompletionProvider, Message, ProviderError, Role};
pub use style::CommentStyle;
pub use unit::{SyntaxUnit, UnitKind};
