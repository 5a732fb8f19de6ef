use super::input_stream::InputStream;
use crate::error_handling::Error::{IOError, NonAsciiCharacter};
use crate::error_handling::Result;
use std::io::{BufReader, Read};
use std::path::Path;

const BUF_SIZE: usize = 4096;

/// Reads a file in fixed-size chunks and hands out its bytes as characters.
/// Only ASCII input is accepted.
pub struct BufferedFileStream {
    buf_reader: BufReader<std::fs::File>,
    pos: usize,
    end: usize,
    buffer: [u8; BUF_SIZE],
}

impl BufferedFileStream {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        match std::fs::File::open(path) {
            Ok(file) => Ok(Self {
                buf_reader: BufReader::new(file),
                pos: 0,
                end: 0,
                buffer: [0; BUF_SIZE],
            }),
            Err(e) => Err(IOError(e)),
        }
    }
}

impl InputStream for BufferedFileStream {
    fn get_next_char(&mut self) -> Result<Option<char>> {
        if self.pos == self.end {
            match self.buf_reader.read(&mut self.buffer) {
                Ok(byte_read) => {
                    if 0 == byte_read {
                        return Ok(None);
                    }
                    self.end = byte_read;
                    self.pos = 0;
                }
                Err(e) => return Err(IOError(e)),
            }
        }
        let c = self.buffer[self.pos];
        self.pos += 1;
        if !c.is_ascii() {
            return Err(NonAsciiCharacter(c));
        }
        Ok(Some(c as char))
    }
}

/// An in-memory stream over a string.
pub struct StrStream {
    chars: Vec<char>,
    pos: usize,
}

impl StrStream {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }
}

impl InputStream for StrStream {
    fn get_next_char(&mut self) -> Result<Option<char>> {
        let c = self.chars.get(self.pos).copied();
        if c.is_some() {
            self.pos += 1;
        }
        Ok(c)
    }
}
