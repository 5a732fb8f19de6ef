mod input_stream;
mod streams;

pub use input_stream::InputStream;
pub use streams::BufferedFileStream;
pub use streams::StrStream;
