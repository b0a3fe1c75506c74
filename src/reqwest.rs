//! The HTTP side of the reader: one GET, one validation, one read loop.

use std::io::{self, Write};

use futures_util::StreamExt;
use reqwest::Response;
use reqwest::header::CONTENT_TYPE;

use crate::console::Printer;
use crate::errors::Error;
use crate::event_stream::EventStream;

/// Substring the response's content type must carry.
const EVENT_STREAM_MIME: &str = "text/event-stream";

/// Convert a [`Response`] into a [`Stream`][futures_core::Stream] of events
/// over its body.
pub fn response_to_stream(
    response: Response,
) -> EventStream<impl futures_core::Stream<Item = reqwest::Result<bytes::Bytes>>> {
    EventStream::new(response.bytes_stream())
}

/// Connect to `url` and print its event stream to stdout.
///
/// See [`run_with`].
pub async fn run(url: &str) -> Result<(), Error> {
    run_with(url, io::stdout()).await
}

/// Connect to `url` and print its event stream to `out`.
///
/// Returns normally when the terminal `end` event is dispatched or when the
/// peer closes the stream, both count as success. An endpoint that answers
/// with something other than `text/event-stream` is not an error either: its
/// body is reported on stderr once and the run ends. Transport failures, on
/// the other hand, surface as [`Error::Transport`] and are expected to abort
/// the process.
///
/// There is no timeout on the connect or on any read. A stalled server stalls
/// the caller.
pub async fn run_with<W: Write>(url: &str, out: W) -> Result<(), Error> {
    let response = reqwest::get(url).await?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if !content_type.contains(EVENT_STREAM_MIME) {
        eprintln!("expected {EVENT_STREAM_MIME}, got {content_type:?}");
        eprintln!("{}", response.text().await?);
        return Ok(());
    }

    let mut stream = std::pin::pin!(response_to_stream(response));
    let mut printer = Printer::new(out);

    while let Some(event) = stream.next().await.transpose()? {
        printer.print(&event)?;
        if event.kind().is_terminal() {
            // dropping the stream here also drops the connection, buffered
            // and in-flight data after `end` is never parsed
            break;
        }
    }

    Ok(())
}
