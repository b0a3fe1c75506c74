//! Console reader for retrieval-augmented chat answers streamed as
//! [Server-Sent Events](https://html.spec.whatwg.org/multipage/server-sent-events.html).
//!
//! A retrieval-chat backend narrates its work over one long-lived HTTP
//! response: progress notes, the documents it retrieved, the answer token by
//! token, citations, and a terminal `end` event. `ragtail` connects to such an
//! endpoint, checks that it actually speaks the event-stream protocol, and
//! renders every event on the console as it arrives.
//!
//! The crate is layered so the parsing is usable without the HTTP client:
//!
//! - [`run`] / [`run_with`] (requires the `reqwest` feature) - connect,
//!   validate the content type, print until `end` or end-of-stream.
//! - [`EventStream`] - a [`Stream`][futures_core::Stream] adapter that
//!   converts any `Stream<Item = Result<impl AsRef<[u8]>, E>>` into parsed
//!   [`Event`][event::Event]s.
//! - [`Utf8Stream`][utf8_stream::Utf8Stream] - lossy incremental UTF-8
//!   decoding that survives multi-byte characters split across chunks.
//! - [`parser::parse_frame`] - frame-level field scanning for custom
//!   integrations.
//!
//! # Quick start
//!
//! ```ignore
//! ragtail::run("http://127.0.0.1:8000/stream").await?;
//! ```
//!
//! # Using `EventStream` directly
//!
//! If you already have a byte stream (from any HTTP client, a file, a fixture)
//! you can skip the client layer:
//!
//! ```rust
//! use bytes::Bytes;
//! use futures::StreamExt;
//! use ragtail::EventStream;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let chunks = vec![
//!     Ok::<_, std::io::Error>(Bytes::from("event: status\ndata: loading\n\n")),
//! ];
//! let mut stream = EventStream::new(futures::stream::iter(chunks));
//!
//! while let Some(Ok(event)) = stream.next().await {
//!     println!("{}: {}", event.event, event.data);
//! }
//! # }
//! ```
//!
//! # Feature flags
//!
//! | Feature | Default | Description |
//! | --- | --- | --- |
//! | `reqwest` | on (via `cli`) | The HTTP client layer: [`run`], [`run_with`], [`response_to_stream`]. |
//! | `cli` | on | The `ragtail` binary (pulls in `tokio`). |

pub(crate) mod constants;
pub mod console;
#[cfg(feature = "reqwest")]
pub mod errors;
pub mod event;
pub mod event_stream;
pub mod parser;
#[cfg(feature = "reqwest")]
pub mod reqwest;
pub mod utf8_stream;

pub use console::Printer;
pub use event::{Event, EventKind};
pub use event_stream::EventStream;

#[cfg(feature = "reqwest")]
pub use reqwest::{response_to_stream, run, run_with};
