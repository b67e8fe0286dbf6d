//! Capacity-bounded output buffer.
//! Every append is checked against the bound before anything is written.

use crate::errors::{PathTreeError, Result};

/// Default capacity for canonical paths, in bytes.
pub const PATH_MAX: usize = 4096;

#[derive(Debug)]
pub struct BoundedBuf<'a> {
    buf: String,
    capacity: usize,
    /// Input being processed; reported in errors.
    origin: &'a str,
}

impl<'a> BoundedBuf<'a> {
    pub fn new(origin: &'a str, capacity: usize) -> Self {
        Self {
            buf: String::new(),
            capacity,
            origin,
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn ends_with_slash(&self) -> bool {
        self.buf.ends_with('/')
    }

    pub fn push_str(&mut self, s: &str) -> Result<()> {
        let needed = self.buf.len() + s.len();
        if needed > self.capacity {
            return Err(PathTreeError::BufferTooSmall {
                path: self.origin.to_owned(),
                needed,
                capacity: self.capacity,
            });
        }
        self.buf
            .try_reserve(s.len())
            .map_err(|_| PathTreeError::OutOfMemory {
                path: self.origin.to_owned(),
            })?;
        self.buf.push_str(s);
        Ok(())
    }

    pub fn push_slash(&mut self) -> Result<()> {
        self.push_str("/")
    }

    /// Cut back to `len` bytes; `len` must sit on a char boundary.
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}
