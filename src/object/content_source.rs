use std::io::{BufRead, Cursor, Result};
use std::vec::Vec;

/// Trait used for reading object payloads from various sources.
pub trait ContentSource {
    /// Returns the length (in bytes) of the content.
    fn len(&self) -> usize;

    /// Returns true if the content is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a `BufRead` struct which can be used for reading the content.
    fn open<'a>(&'a self) -> Result<Box<dyn BufRead + 'a>>;
}

impl ContentSource for Vec<u8> {
    fn len(&self) -> usize {
        self.len()
    }

    fn open<'x>(&'x self) -> Result<Box<dyn BufRead + 'x>> {
        Ok(Box::new(Cursor::new(self)))
    }
}

impl ContentSource for String {
    fn len(&self) -> usize {
        self.len()
    }

    fn open<'x>(&'x self) -> Result<Box<dyn BufRead + 'x>> {
        Ok(Box::new(Cursor::new(self.as_bytes())))
    }
}
