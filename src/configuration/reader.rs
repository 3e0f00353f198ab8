use std::io::{self, BufRead};


/// Maximum number of bytes of a single physical line that are considered.
/// Anything past this on the same line is discarded.
pub const MAXIMUM_LINE_LENGTH: usize = 127;

const COMMENT_MARKER: char = '#';


/// A normalized configuration line: not empty, not a comment,
/// trailing newline removed.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ConfigurationLine {
    /// 1-based physical line number in the source.
    pub number: usize,

    pub text: String,
}


/// Streams normalized [`ConfigurationLine`]s out of a buffered reader.
///
/// Lines are yielded verbatim except for the removal of one trailing `\n`.
/// In particular, leading whitespace is kept, and only lines starting with
/// `#` in the very first column count as comments.
///
/// After an I/O error is yielded, the iterator is exhausted.
pub struct ConfigurationLines<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: usize,
    finished: bool,
}

impl<R> ConfigurationLines<R>
where
    R: BufRead,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(MAXIMUM_LINE_LENGTH + 1),
            line_number: 0,
            finished: false,
        }
    }

    /// Reads the next physical line, bounded to [`MAXIMUM_LINE_LENGTH`] bytes
    /// of content. Returns `Ok(None)` at end of input.
    fn read_physical_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();

        let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
        if bytes_read == 0 {
            return Ok(None);
        }

        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
        }

        self.buffer.truncate(MAXIMUM_LINE_LENGTH);

        Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
    }
}

impl<R> Iterator for ConfigurationLines<R>
where
    R: BufRead,
{
    type Item = io::Result<ConfigurationLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let text = match self.read_physical_line() {
                Ok(Some(text)) => text,
                Ok(None) => {
                    self.finished = true;
                    return None;
                }
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            };

            self.line_number += 1;

            if text.is_empty() || text.starts_with(COMMENT_MARKER) {
                continue;
            }

            return Some(Ok(ConfigurationLine {
                number: self.line_number,
                text,
            }));
        }
    }
}
