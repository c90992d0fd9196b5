//! Stream lifecycle and limit enforcement.
//!
//! A stream wraps one renderer and one sink and owns the open/append/close
//! state machine. It counts entries and rendered bytes as they are produced
//! and rejects an append before either protocol limit would be crossed, so
//! the persisted artifact never silently violates the limits. Splitting
//! output across files on overflow is the caller's policy, not the stream's.

use crate::render::{SitemapIndexRender, SitemapRender};
use crate::sink::{NamedSink, Sink};
use crate::sitemap::Sitemap;
use crate::url::Url;
use std::fmt;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Maximum number of entries per sitemap or sitemap index file.
pub const LINKS_LIMIT: usize = 50_000;

/// Maximum uncompressed size of a sitemap file, in bytes (10 MiB).
pub const BYTE_LIMIT: usize = 10_485_760;

/// Maximum uncompressed size of a sitemap index file, in bytes (50 MiB).
pub const INDEX_BYTE_LIMIT: usize = 52_428_800;

/// Lifecycle state of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Closed,
    Open,
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamState::Closed => f.write_str("closed"),
            StreamState::Open => f.write_str("open"),
        }
    }
}

/// Errors surfaced by stream operations.
#[derive(Error, Debug)]
pub enum StreamError {
    /// Operation invoked while the stream is in the wrong state.
    #[error("stream is {actual}, expected {expected}")]
    StreamState {
        expected: StreamState,
        actual: StreamState,
    },

    /// The pending push would exceed the entry limit. The entry was not
    /// written and the stream remains open.
    #[error("link limit of {limit} links per file reached")]
    LinksOverflow { limit: usize },

    /// The pending push would exceed the byte limit. The entry was not
    /// written and the stream remains open.
    #[error("byte limit of {limit} bytes per file would be exceeded")]
    SizeOverflow { limit: usize },

    /// The destination could not be opened or written.
    #[error("file access error: {0}")]
    FileAccess(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, StreamError>;

/// Shared state machine behind both stream types.
///
/// Byte accounting is measured on the UTF-8 byte length of rendered
/// fragments before the sink sees them; compression in the sink never
/// changes the overflow point.
struct Engine<S: Sink> {
    sink: S,
    state: StreamState,
    links: usize,
    bytes: usize,
    byte_limit: usize,
}

impl<S: Sink> Engine<S> {
    fn new(sink: S, byte_limit: usize) -> Self {
        Self {
            sink,
            state: StreamState::Closed,
            links: 0,
            bytes: 0,
            byte_limit,
        }
    }

    fn expect(&self, expected: StreamState) -> Result<()> {
        if self.state != expected {
            return Err(StreamError::StreamState {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    /// Acquire the sink, write the opening markup, start counting.
    /// A failed acquisition leaves the stream closed.
    fn open(&mut self, start: &str) -> Result<()> {
        self.expect(StreamState::Closed)?;
        self.sink.open()?;
        self.sink.write(start.as_bytes())?;
        self.links = 0;
        self.bytes = start.len();
        self.state = StreamState::Open;
        Ok(())
    }

    /// First half of a push: state and entry-limit checks. Runs before
    /// the renderer is invoked so a rejected push renders nothing.
    fn reserve_entry(&self) -> Result<()> {
        self.expect(StreamState::Open)?;
        if self.links + 1 > LINKS_LIMIT {
            return Err(StreamError::LinksOverflow { limit: LINKS_LIMIT });
        }
        Ok(())
    }

    /// Second half of a push: size check against the rendered fragment,
    /// then write and count. An oversized fragment is never partially
    /// written.
    fn append(&mut self, fragment: &str) -> Result<()> {
        if self.bytes + fragment.len() > self.byte_limit {
            return Err(StreamError::SizeOverflow {
                limit: self.byte_limit,
            });
        }
        self.sink.write(fragment.as_bytes())?;
        self.links += 1;
        self.bytes += fragment.len();
        Ok(())
    }

    /// Write the closing markup and finalize the sink. The closing
    /// fragment is never overflow-checked: a stream that opened must
    /// always be able to close. The sink is released and the counters
    /// reset even when finalize fails.
    fn close(&mut self, end: &str) -> Result<()> {
        self.expect(StreamState::Open)?;
        let wrote = self.sink.write(end.as_bytes());
        let finalized = self.sink.close();
        self.links = 0;
        self.bytes = 0;
        self.state = StreamState::Closed;
        wrote.and(finalized)?;
        Ok(())
    }

    fn count(&self) -> usize {
        self.links
    }
}

/// Writes one sitemap document per open/close cycle.
///
/// The renderer is a shared, stateless collaborator; the sink is owned
/// exclusively by this stream. One instance can be opened and closed any
/// number of times, each cycle producing an independent document.
///
/// # Example
///
/// ```no_run
/// use sitemap_stream::{FileSink, PlainTextSitemapRender, SitemapStream, Url};
///
/// let render = PlainTextSitemapRender;
/// let mut stream = SitemapStream::new(&render, FileSink::new("sitemap.xml"));
/// stream.open()?;
/// stream.push(&Url::new("https://example.com/"))?;
/// stream.close()?;
/// # Ok::<(), sitemap_stream::StreamError>(())
/// ```
pub struct SitemapStream<'r, R: SitemapRender, S: Sink> {
    render: &'r R,
    engine: Engine<S>,
}

impl<'r, R: SitemapRender, S: Sink> SitemapStream<'r, R, S> {
    pub fn new(render: &'r R, sink: S) -> Self {
        Self {
            render,
            engine: Engine::new(sink, BYTE_LIMIT),
        }
    }

    /// Open the destination and write the opening markup.
    pub fn open(&mut self) -> Result<()> {
        // Renderer start markup is cheap and stateless; render after the
        // state check so a misuse error renders nothing.
        self.engine.expect(StreamState::Closed)?;
        let start = self.render.start();
        self.engine.open(&start)
    }

    /// Render and write one entry, enforcing both protocol limits.
    pub fn push(&mut self, url: &Url) -> Result<()> {
        self.engine.reserve_entry()?;
        let fragment = self.render.url(url);
        self.engine.append(&fragment)
    }

    /// Write the closing markup and finalize the destination.
    pub fn close(&mut self) -> Result<()> {
        self.engine.expect(StreamState::Open)?;
        let end = self.render.end();
        self.engine.close(&end)
    }

    /// Number of entries appended since the last open; 0 when closed.
    pub fn count(&self) -> usize {
        self.engine.count()
    }

    /// The byte limit this stream enforces.
    pub fn byte_limit(&self) -> usize {
        self.engine.byte_limit
    }
}

impl<R: SitemapRender, S: NamedSink> SitemapStream<'_, R, S> {
    /// The path of the file-backed destination.
    pub fn filename(&self) -> &Path {
        self.engine.sink.filename()
    }
}

/// Writes one sitemap index document per open/close cycle.
///
/// Identical state machine and counting to [`SitemapStream`]; only the
/// renderer contract and the byte limit (50 MiB) differ.
pub struct SitemapIndexStream<'r, R: SitemapIndexRender, S: Sink> {
    render: &'r R,
    engine: Engine<S>,
}

impl<'r, R: SitemapIndexRender, S: Sink> SitemapIndexStream<'r, R, S> {
    pub fn new(render: &'r R, sink: S) -> Self {
        Self {
            render,
            engine: Engine::new(sink, INDEX_BYTE_LIMIT),
        }
    }

    pub fn open(&mut self) -> Result<()> {
        self.engine.expect(StreamState::Closed)?;
        let start = self.render.start();
        self.engine.open(&start)
    }

    /// Render and write one child-sitemap pointer.
    pub fn push(&mut self, sitemap: &Sitemap) -> Result<()> {
        self.engine.reserve_entry()?;
        let fragment = self.render.sitemap(sitemap);
        self.engine.append(&fragment)
    }

    pub fn close(&mut self) -> Result<()> {
        self.engine.expect(StreamState::Open)?;
        let end = self.render.end();
        self.engine.close(&end)
    }

    pub fn count(&self) -> usize {
        self.engine.count()
    }

    pub fn byte_limit(&self) -> usize {
        self.engine.byte_limit
    }
}

impl<R: SitemapIndexRender, S: NamedSink> SitemapIndexStream<'_, R, S> {
    pub fn filename(&self) -> &Path {
        self.engine.sink.filename()
    }
}
