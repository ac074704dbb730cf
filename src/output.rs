//! Output management module
//!
//! Streams generated words to a sink with buffering, one word per line.

use crate::progress::ProgressObserver;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Default buffer size for file writing (8MB)
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024 * 1024;

/// Pass-through sink that counts the line terminators the inner writer accepted
struct CountingSink<W: Write> {
    inner: W,
    lines: u64,
}

impl<W: Write> Write for CountingSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.lines += buf[..n].iter().filter(|&&b| b == b'\n').count() as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Buffered line writer.
///
/// Tracks both the lines it accepted into its buffer and the lines that
/// actually reached the sink. Lines are assumed not to contain `\n`
/// themselves.
pub struct OutputWriter<W: Write> {
    writer: BufWriter<CountingSink<W>>,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter<File> {
    /// Create (or truncate) the file at `path`
    pub fn create(path: &Path, buffer_size: usize) -> io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        Ok(Self::from_writer(file, buffer_size))
    }
}

impl<W: Write> OutputWriter<W> {
    /// Wrap an arbitrary sink
    pub fn from_writer(sink: W, buffer_size: usize) -> Self {
        let sink = CountingSink { inner: sink, lines: 0 };
        Self {
            writer: BufWriter::with_capacity(buffer_size, sink),
            lines_written: 0,
            bytes_written: 0,
        }
    }

    /// Write `prefix` followed by `word` and a newline
    pub fn write_word(&mut self, prefix: &str, word: &str) -> io::Result<()> {
        self.writer.write_all(prefix.as_bytes())?;
        self.writer.write_all(word.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.lines_written += 1;
        self.bytes_written += (prefix.len() + word.len()) as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Flush the buffer to the sink
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Number of lines accepted into the buffer
    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    /// Bytes accepted into the buffer
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush what still can be flushed, release the sink and return the
    /// number of complete lines it received.
    ///
    /// Buffered bytes that the sink refused are discarded, so the count
    /// stays exact on a failed write.
    pub fn finish(mut self) -> u64 {
        let _ = self.writer.flush();
        let (sink, _unwritten) = self.writer.into_parts();
        sink.lines
    }
}

/// Write words until the iterator ends or `limit` lines have been written.
///
/// The observer sees `(written, total)` after every line. On error,
/// `OutputWriter::finish` tells how many words actually reached the sink.
pub fn stream_words<W, I>(
    writer: &mut OutputWriter<W>,
    words: I,
    prefix: &str,
    limit: Option<u64>,
    total: u64,
    mut observer: Option<&mut dyn ProgressObserver>,
) -> io::Result<u64>
where
    W: Write,
    I: IntoIterator<Item = String>,
{
    let start = writer.lines_written();
    let mut words = words.into_iter();

    loop {
        if let Some(limit) = limit {
            if writer.lines_written() - start >= limit {
                log::info!("Cutoff of {} words reached", limit);
                break;
            }
        }

        // Checked before pulling so the cutoff never generates an extra word
        let Some(word) = words.next() else { break };
        writer.write_word(prefix, &word)?;

        if let Some(obs) = observer.as_deref_mut() {
            obs.on_progress(writer.lines_written() - start, total);
        }
    }

    writer.flush()?;
    Ok(writer.lines_written() - start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Sink that accepts `capacity` bytes in total, then fails
    struct FailingSink {
        capacity: usize,
        accepted: usize,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.accepted == self.capacity {
                return Err(io::Error::new(io::ErrorKind::Other, "sink full"));
            }
            let n = buf.len().min(self.capacity - self.accepted);
            self.accepted += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_output_writer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.txt");

        let mut writer = OutputWriter::create(&path, 1024).unwrap();
        writer.write_word("", "hello").unwrap();
        writer.write_word("x-", "world").unwrap();
        writer.flush().unwrap();

        assert_eq!(writer.lines_written(), 2);
        assert_eq!(writer.bytes_written(), 6 + 8);
        assert_eq!(writer.finish(), 2);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "hello\nx-world\n");
    }

    #[test]
    fn test_stream_with_limit() {
        let mut out = Vec::new();
        {
            let mut writer = OutputWriter::from_writer(&mut out, 16);
            let n = stream_words(&mut writer, words(&["a", "b", "c"]), "", Some(2), 2, None).unwrap();
            assert_eq!(n, 2);
        }
        assert_eq!(out, b"a\nb\n");
    }

    #[test]
    fn test_stream_reports_progress() {
        let mut seen = Vec::new();
        let mut observer = |count: u64, total: u64| seen.push((count, total));

        let mut out = Vec::new();
        {
            let mut writer = OutputWriter::from_writer(&mut out, 16);
            let observer: &mut dyn ProgressObserver = &mut observer;
            stream_words(&mut writer, words(&["a", "b"]), "p", None, 2, Some(observer)).unwrap();
        }

        assert_eq!(seen, vec![(1, 2), (2, 2)]);
        assert_eq!(out, b"pa\npb\n");
    }

    #[test]
    fn test_stream_failure_keeps_count() {
        let sink = FailingSink { capacity: 5, accepted: 0 };
        // Unbuffered so each line hits the sink immediately
        let mut writer = OutputWriter::from_writer(sink, 0);

        let err = stream_words(&mut writer, words(&["aa", "bb", "cc"]), "", None, 3, None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(writer.lines_written(), 1);
        assert_eq!(writer.finish(), 1);
    }

    #[test]
    fn test_buffered_lines_not_counted_as_flushed() {
        // Nothing reaches the sink: all three words sit in the buffer until the final flush fails
        let sink = FailingSink { capacity: 0, accepted: 0 };
        let mut writer = OutputWriter::from_writer(sink, 1024);

        assert!(stream_words(&mut writer, words(&["aa", "bb", "cc"]), "", None, 3, None).is_err());
        assert_eq!(writer.lines_written(), 3);
        assert_eq!(writer.finish(), 0);
    }

    #[test]
    fn test_partial_flush_counts_complete_lines() {
        // "aa\nbb" reaches the sink; the second newline does not
        let sink = FailingSink { capacity: 5, accepted: 0 };
        let mut writer = OutputWriter::from_writer(sink, 1024);

        assert!(stream_words(&mut writer, words(&["aa", "bb", "cc"]), "", None, 3, None).is_err());
        assert_eq!(writer.lines_written(), 3);
        assert_eq!(writer.finish(), 1);
    }
}
