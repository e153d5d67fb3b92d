use crate::error::ParserError;

/// Largest source file annotr will touch (1 MiB).
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Only this prefix is sniffed for NUL bytes.
const SNIFF_LEN: usize = 8 * 1024;

/// Reject files larger than [`MAX_FILE_SIZE`].
pub fn check_file_size(path: &str, size: u64) -> Result<(), ParserError> {
    match size {
        s if s <= MAX_FILE_SIZE => Ok(()),
        size => Err(ParserError::FileTooLarge {
            path: path.to_owned(),
            size,
            max: MAX_FILE_SIZE,
        }),
    }
}

/// A NUL byte near the start of the buffer marks it as binary.
pub fn is_binary(content: &[u8]) -> bool {
    content.iter().take(SNIFF_LEN).any(|&b| b == 0)
}

/// Gatekeeper between raw file bytes and the parser: size, binary sniff, then
/// UTF-8 decoding. Returns the borrowed text on success.
pub fn check_source<'a>(path: &str, content: &'a [u8]) -> Result<&'a str, ParserError> {
    check_file_size(path, content.len() as u64)?;

    let rejected = |reason| ParserError::InvalidEncoding {
        path: path.to_owned(),
        reason,
    };
    if is_binary(content) {
        return Err(rejected("binary content"));
    }
    std::str::from_utf8(content).map_err(|_| rejected("not valid UTF-8"))
}
