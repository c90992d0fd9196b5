//! Streaming sitemap.xml and sitemap index writer.
//!
//! This library writes sitemap documents within the published protocol
//! limits (50,000 entries and 10 MiB per sitemap file, 50 MiB per index
//! file) and fails fast with a typed error before either limit would be
//! crossed. Rendering is pluggable and destinations range from an
//! in-memory callback to plain or gzip/bzip2-compressed files.
//!
//! # Example
//!
//! ```rust,no_run
//! use sitemap_stream::{FileSink, PlainTextSitemapRender, SitemapStream, Url};
//!
//! let render = PlainTextSitemapRender;
//! let mut stream = SitemapStream::new(&render, FileSink::new("sitemap.xml"));
//!
//! stream.open()?;
//! stream.push(&Url::new("https://example.com/"))?;
//! stream.push(&Url::new("https://example.com/about"))?;
//! stream.close()?;
//! # Ok::<(), sitemap_stream::StreamError>(())
//! ```

pub mod render;
pub mod sink;
pub mod sitemap;
pub mod stream;
pub mod url;

// Re-export commonly used types
pub use render::{
    PlainTextSitemapIndexRender, PlainTextSitemapRender, SitemapIndexRender, SitemapRender,
};
pub use sink::{Bzip2FileSink, CallbackSink, FileSink, GzipFileSink, NamedSink, Sink};
pub use sitemap::Sitemap;
pub use stream::{
    SitemapIndexStream, SitemapStream, StreamError, StreamState, BYTE_LIMIT, INDEX_BYTE_LIMIT,
    LINKS_LIMIT,
};
pub use url::{ChangeFrequency, Url};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::render::{PlainTextSitemapIndexRender, PlainTextSitemapRender};
    pub use crate::sink::{Bzip2FileSink, CallbackSink, FileSink, GzipFileSink};
    pub use crate::sitemap::Sitemap;
    pub use crate::stream::{SitemapIndexStream, SitemapStream, StreamError};
    pub use crate::url::{ChangeFrequency, Url};
}
