use crate::error_handling::Result;

/// A source of input symbols, read one character at a time.
pub trait InputStream {
    fn get_next_char(&mut self) -> Result<Option<char>>;
}
