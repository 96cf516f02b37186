//! Input selection: a named log file or standard input

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::error::InputError;

/// Open `path` for reading, or standard input when `path` is `None`
pub fn open_source(path: Option<&Path>) -> Result<Box<dyn BufRead>, InputError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|source| InputError::Unavailable {
                path: path.display().to_string(),
                source,
            })?;
            tracing::debug!(path = %path.display(), "reading log file");
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            tracing::debug!("reading standard input");
            Ok(Box::new(BufReader::new(io::stdin())))
        }
    }
}

/// Iterator over the lines of a reader
///
/// Invalid UTF-8 is replaced rather than treated as an error, and trailing
/// `\n` / `\r\n` is stripped.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<String, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(InputError::Read(e))),
        }
    }
}
