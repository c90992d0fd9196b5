//! Byte sink abstraction and its destinations.
//!
//! A sink is the narrow capability a stream writes through: prepare the
//! destination, accept ordered chunks of rendered markup, flush and
//! release on close. Chunks arrive uncompressed; whether a sink
//! compresses them on the way to disk is invisible to the stream, which
//! accounts bytes before handing them over.

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination for rendered markup chunks.
///
/// `open` may be called again after `close`; each cycle re-acquires the
/// destination from scratch. Writing outside an open cycle is a caller
/// bug and surfaces as an I/O error.
pub trait Sink {
    /// Prepare the destination for a new document.
    fn open(&mut self) -> io::Result<()>;

    /// Persist one chunk.
    fn write(&mut self, chunk: &[u8]) -> io::Result<()>;

    /// Flush trailing bytes and release the destination.
    fn close(&mut self) -> io::Result<()>;
}

/// Sink bound to a filesystem path.
pub trait NamedSink: Sink {
    /// The path the document is written to.
    fn filename(&self) -> &Path;
}

fn not_open() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "sink is not open")
}

/// Hands every chunk verbatim, in order, to a user-supplied handler.
///
/// No buffering beyond what the handler does itself. Used for tests and
/// custom destinations such as HTTP response streaming.
pub struct CallbackSink<F: FnMut(&[u8])> {
    handler: F,
}

impl<F: FnMut(&[u8])> CallbackSink<F> {
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F: FnMut(&[u8])> Sink for CallbackSink<F> {
    fn open(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        (self.handler)(chunk);
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Appends chunks directly to a file, truncating any previous content
/// at `open`.
pub struct FileSink {
    path: PathBuf,
    file: Option<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }
}

impl Sink for FileSink {
    fn open(&mut self) -> io::Result<()> {
        self.file = Some(BufWriter::new(File::create(&self.path)?));
        Ok(())
    }

    fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.file.as_mut().ok_or_else(not_open)?.write_all(chunk)
    }

    fn close(&mut self) -> io::Result<()> {
        // Take the handle first so the fd is released even if the
        // final flush fails.
        let mut file = self.file.take().ok_or_else(not_open)?;
        file.flush()
    }
}

impl NamedSink for FileSink {
    fn filename(&self) -> &Path {
        &self.path
    }
}

/// Writes chunks through a streaming gzip compressor into a file.
///
/// The gzip trailer is emitted when the stream closes; the artifact is
/// readable by any standard gzip decompressor.
pub struct GzipFileSink {
    path: PathBuf,
    encoder: Option<GzEncoder<File>>,
}

impl GzipFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoder: None,
        }
    }
}

impl Sink for GzipFileSink {
    fn open(&mut self) -> io::Result<()> {
        let file = File::create(&self.path)?;
        self.encoder = Some(GzEncoder::new(file, flate2::Compression::default()));
        Ok(())
    }

    fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.encoder.as_mut().ok_or_else(not_open)?.write_all(chunk)
    }

    fn close(&mut self) -> io::Result<()> {
        // finish() consumes the encoder, so the fd is closed whether or
        // not the trailer write succeeds.
        let encoder = self.encoder.take().ok_or_else(not_open)?;
        let mut file = encoder.finish()?;
        file.flush()
    }
}

impl NamedSink for GzipFileSink {
    fn filename(&self) -> &Path {
        &self.path
    }
}

/// Writes chunks through a streaming bzip2 compressor into a file.
pub struct Bzip2FileSink {
    path: PathBuf,
    encoder: Option<BzEncoder<File>>,
}

impl Bzip2FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            encoder: None,
        }
    }
}

impl Sink for Bzip2FileSink {
    fn open(&mut self) -> io::Result<()> {
        let file = File::create(&self.path)?;
        self.encoder = Some(BzEncoder::new(file, bzip2::Compression::default()));
        Ok(())
    }

    fn write(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.encoder.as_mut().ok_or_else(not_open)?.write_all(chunk)
    }

    fn close(&mut self) -> io::Result<()> {
        let encoder = self.encoder.take().ok_or_else(not_open)?;
        let mut file = encoder.finish()?;
        file.flush()
    }
}

impl NamedSink for Bzip2FileSink {
    fn filename(&self) -> &Path {
        &self.path
    }
}
