//! Behavior of a stream writing through the callback sink.
//!
//! Covers chunk ordering, state violations, and both overflow limits at
//! their exact boundaries.

use sitemap_stream::{
    CallbackSink, SitemapRender, SitemapStream, StreamError, Url, BYTE_LIMIT, LINKS_LIMIT,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Renderer producing fixed markers so output positions are predictable.
struct MarkerRender {
    start: String,
    end: String,
    url: String,
}

impl MarkerRender {
    fn new(start: &str, end: &str, url: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            url: url.to_string(),
        }
    }
}

impl SitemapRender for MarkerRender {
    fn start(&self) -> String {
        self.start.clone()
    }

    fn end(&self) -> String {
        self.end.clone()
    }

    fn url(&self, _url: &Url) -> String {
        self.url.clone()
    }
}

/// Renderer echoing the entry location, like the original mock-based tests.
struct LocationRender;

impl SitemapRender for LocationRender {
    fn start(&self) -> String {
        "Stream opened".to_string()
    }

    fn end(&self) -> String {
        "Stream closed".to_string()
    }

    fn url(&self, url: &Url) -> String {
        url.location().to_string()
    }
}

fn capture() -> (Rc<RefCell<Vec<Vec<u8>>>>, CallbackSink<impl FnMut(&[u8])>) {
    let chunks = Rc::new(RefCell::new(Vec::new()));
    let writer = Rc::clone(&chunks);
    let sink = CallbackSink::new(move |chunk: &[u8]| {
        writer.borrow_mut().push(chunk.to_vec());
    });
    (chunks, sink)
}

#[test]
fn chunks_arrive_verbatim_in_order() {
    let render = LocationRender;
    let (chunks, sink) = capture();
    let mut stream = SitemapStream::new(&render, sink);

    stream.open().unwrap();
    stream.push(&Url::new("/foo")).unwrap();
    stream.push(&Url::new("/bar")).unwrap();
    stream.push(&Url::new("/baz")).unwrap();
    stream.close().unwrap();

    let chunks = chunks.borrow();
    let expected: Vec<&[u8]> = vec![
        b"Stream opened",
        b"/foo",
        b"/bar",
        b"/baz",
        b"Stream closed",
    ];
    assert_eq!(chunks.len(), expected.len());
    for (chunk, expected) in chunks.iter().zip(expected) {
        assert_eq!(chunk.as_slice(), expected);
    }
}

#[test]
fn open_twice_fails() {
    let render = LocationRender;
    let (_, sink) = capture();
    let mut stream = SitemapStream::new(&render, sink);

    stream.open().unwrap();
    assert!(matches!(stream.open(), Err(StreamError::StreamState { .. })));
    // Stream stayed open and still closes cleanly.
    stream.close().unwrap();
}

#[test]
fn close_before_open_fails_and_renders_nothing() {
    let render = LocationRender;
    let (chunks, sink) = capture();
    let mut stream = SitemapStream::new(&render, sink);

    assert!(matches!(stream.close(), Err(StreamError::StreamState { .. })));
    assert!(chunks.borrow().is_empty());
}

#[test]
fn close_twice_fails() {
    let render = LocationRender;
    let (_, sink) = capture();
    let mut stream = SitemapStream::new(&render, sink);

    stream.open().unwrap();
    stream.close().unwrap();
    assert!(matches!(stream.close(), Err(StreamError::StreamState { .. })));
}

/// Renderer that refuses per-entry rendering; used to prove a rejected
/// push never reaches the renderer.
struct NoEntryRender;

impl SitemapRender for NoEntryRender {
    fn start(&self) -> String {
        "Stream opened".to_string()
    }

    fn end(&self) -> String {
        "Stream closed".to_string()
    }

    fn url(&self, _url: &Url) -> String {
        panic!("renderer must not be invoked for a rejected push");
    }
}

#[test]
fn push_before_open_fails_without_rendering() {
    let render = NoEntryRender;
    let (chunks, sink) = capture();
    let mut stream = SitemapStream::new(&render, sink);

    assert!(matches!(
        stream.push(&Url::new("/")),
        Err(StreamError::StreamState { .. })
    ));
    assert!(chunks.borrow().is_empty());
}

#[test]
fn push_after_close_fails_without_rendering() {
    let render = NoEntryRender;
    let (_, sink) = capture();
    let mut stream = SitemapStream::new(&render, sink);

    stream.open().unwrap();
    stream.close().unwrap();
    assert!(matches!(
        stream.push(&Url::new("/")),
        Err(StreamError::StreamState { .. })
    ));
}

#[test]
fn links_overflow_on_entry_past_the_limit() {
    let render = MarkerRender::new("[open]", "[close]", "/");
    let (chunks, sink) = capture();
    let mut stream = SitemapStream::new(&render, sink);

    stream.open().unwrap();
    for _ in 0..LINKS_LIMIT {
        stream.push(&Url::new("/")).unwrap();
    }
    assert_eq!(stream.count(), LINKS_LIMIT);

    assert!(matches!(
        stream.push(&Url::new("/")),
        Err(StreamError::LinksOverflow { limit: LINKS_LIMIT })
    ));
    assert_eq!(stream.count(), LINKS_LIMIT);
    stream.close().unwrap();

    // Opening chunk + one chunk per accepted entry + closing chunk.
    assert_eq!(chunks.borrow().len(), LINKS_LIMIT + 2);
}

#[test]
fn size_overflow_one_byte_past_the_limit() {
    // Opening markup sized so the entries fill the limit exactly; the
    // next push would cross it by one byte.
    let loops = 10_000;
    let loop_size = BYTE_LIMIT / loops;
    let prefix_size = BYTE_LIMIT - loops * loop_size + 1;
    let render = MarkerRender::new(&"/".repeat(prefix_size), "[close]", &"/".repeat(loop_size));

    let written = Rc::new(RefCell::new(0usize));
    let counter = Rc::clone(&written);
    let sink = CallbackSink::new(move |chunk: &[u8]| {
        *counter.borrow_mut() += chunk.len();
    });
    let mut stream = SitemapStream::new(&render, sink);

    stream.open().unwrap();
    let mut pushed = 0;
    let overflow = loop {
        match stream.push(&Url::new("/")) {
            Ok(()) => pushed += 1,
            Err(e) => break e,
        }
    };

    assert!(matches!(overflow, StreamError::SizeOverflow { limit: BYTE_LIMIT }));
    assert_eq!(pushed, loops - 1);
    // Never a byte past the limit before closing.
    assert!(*written.borrow() <= BYTE_LIMIT);

    // Overflow leaves the stream open; the closing fragment is exempt.
    stream.close().unwrap();
    assert_eq!(stream.count(), 0);
}
