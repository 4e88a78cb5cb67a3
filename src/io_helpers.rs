use std::io::{self, BufRead, Write};

use bytes::BytesMut;

const INITIAL_CAPACITY: usize = 256;

/// Reads newline-terminated lines from a byte stream, reusing one buffer.
pub struct LineReader<R> {
    inner: R,
    buffer: BytesMut,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        LineReader {
            inner,
            buffer: BytesMut::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Returns the next line without its terminator, or `None` once the
    /// stream is exhausted. A final unterminated line is still returned.
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|&byte| byte == b'\n') {
                let mut line = self.buffer.split_to(pos + 1);
                line.truncate(pos);
                return Ok(Some(decode(&line)));
            }

            let chunk = match self.inner.fill_buf() {
                Ok(chunk) => chunk,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if chunk.is_empty() {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let line = self.buffer.split();
                return Ok(Some(decode(&line)));
            }

            let consumed = chunk.len();
            self.buffer.extend_from_slice(chunk);
            self.inner.consume(consumed);
        }
    }
}

fn decode(line: &[u8]) -> String {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

/// Writes `content` and a newline, then flushes so the text is visible
/// before anything a child process prints.
pub fn write_line(writer: &mut dyn Write, content: &str) -> io::Result<()> {
    writer.write_all(content.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()
}

pub fn write_prompt(writer: &mut dyn Write, prompt: &str) -> io::Result<()> {
    writer.write_all(prompt.as_bytes())?;
    writer.flush()
}
