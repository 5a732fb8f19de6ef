mod error;

pub use error::Error;
pub use error::FormatErrorKind;
pub use error::Result;
