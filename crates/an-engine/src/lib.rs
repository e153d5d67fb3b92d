pub mod annotate;
pub mod buffer;
pub mod error;
pub mod formatter;
pub mod pipeline;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod stripper;
pub mod writer;

pub use annotate::{annotate_source, insertion_order, AnnotateOptions, Annotation};
pub use buffer::LineBuffer;
pub use error::EngineError;
pub use formatter::{clean_completion, format_comment, format_for};
pub use pipeline::{annotate_directory, annotate_file, clear_directory, clear_file, AlwaysConfirm, Confirm};
pub use prompt::{build_comment_prompt, CommentTarget};
pub use report::{BatchReport, FileReport};
pub use scanner::{scan_files, ScanResult};
pub use stripper::{strip_comments, strip_with_dialect, StripOutcome, StripState};
pub use writer::write_atomic;
