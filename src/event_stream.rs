//! Byte stream to [`Event`] stream conversion.

use core::pin::Pin;
use core::task::{Context, Poll, ready};

use futures_core::Stream;

use crate::constants::FRAME_BOUNDARY;
use crate::event::Event;
use crate::parser::{find_frame_boundary, parse_frame};
use crate::utf8_stream::Utf8Stream;

pin_project_lite::pin_project! {
    /// [`Stream`] adapter that turns a stream of byte chunks into parsed
    /// [`Event`]s.
    ///
    /// Chunks are decoded through [`Utf8Stream`] and appended to a text
    /// buffer. Every complete `\n\n`-terminated frame is extracted in order
    /// before the source is polled again, only the trailing partial frame
    /// stays buffered. When the source ends, a buffered partial frame is
    /// discarded rather than emitted.
    pub struct EventStream<S> {
        #[pin]
        decoder: Utf8Stream<S>,
        buffer: String,
        terminated: bool,
    }
}

impl<S> EventStream<S> {
    /// Create a new [`EventStream`] from a stream of [`AsRef<[u8]>`][AsRef]
    pub fn new(stream: S) -> Self {
        Self {
            decoder: Utf8Stream::new(stream),
            buffer: String::new(),
            terminated: false,
        }
    }
}

impl<S, E, B> Stream for EventStream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    type Item = Result<Event, E>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<<Self as Stream>::Item>> {
        let mut this = self.project();

        if *this.terminated {
            return Poll::Ready(None);
        }

        loop {
            // Drain frames that are already complete before reading more.
            while let Some(pos) = find_frame_boundary(this.buffer) {
                let event = parse_frame(&this.buffer[..pos]);
                this.buffer.drain(..pos + FRAME_BOUNDARY.len());
                if let Some(event) = event {
                    return Poll::Ready(Some(Ok(event)));
                }
                // empty or whitespace-only frame, keep draining
            }

            match ready!(this.decoder.as_mut().poll_next(cx)) {
                Some(Ok(text)) => this.buffer.push_str(&text),
                Some(Err(err)) => return Poll::Ready(Some(Err(err))),
                None => {
                    *this.terminated = true;
                    // a partial frame with no closing boundary never fires
                    this.buffer.clear();
                    return Poll::Ready(None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use bytes::Bytes;
    use futures::prelude::*;

    fn ev(event: &str, data: &str) -> Event {
        Event {
            event: event.into(),
            data: data.into(),
        }
    }

    async fn collect(chunks: Vec<&'static [u8]>) -> Vec<Event> {
        EventStream::new(futures::stream::iter(
            chunks.into_iter().map(Bytes::from_static).map(Ok::<_, ()>),
        ))
        .try_collect()
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn typed_event_in_one_chunk() {
        assert_eq!(
            collect(vec![b"event: status\ndata: loading\n\n"]).await,
            vec![ev("status", "loading")]
        );
    }

    #[tokio::test]
    async fn data_lines_joined() {
        assert_eq!(
            collect(vec![b"data: hi\ndata: there\n\n"]).await,
            vec![ev("message", "hi\nthere")]
        );
    }

    #[tokio::test]
    async fn multiple_events_in_one_chunk() {
        assert_eq!(
            collect(vec![b"event: token\ndata: A\n\nevent: token\ndata: B\n\n"]).await,
            vec![ev("token", "A"), ev("token", "B")]
        );
    }

    #[tokio::test]
    async fn frames_split_across_chunks() {
        assert_eq!(
            collect(vec![b"event: sta", b"tus\ndata: load", b"ing\n", b"\n"]).await,
            vec![ev("status", "loading")]
        );
    }

    #[tokio::test]
    async fn multibyte_character_split_across_chunks() {
        // "é" is 0xC3 0xA9, cut between the two bytes
        assert_eq!(
            collect(vec![b"data: caf\xC3", b"\xA9\n\n"]).await,
            vec![ev("message", "café")]
        );
    }

    #[tokio::test]
    async fn chunking_does_not_change_events() {
        let input: &[u8] = b"event: status\ndata: Query received\n\nevent: token\ndata: Based\n\n";
        let whole = collect(vec![input]).await;
        for size in 1..input.len() {
            let chunked = EventStream::new(futures::stream::iter(
                input.chunks(size).map(Bytes::copy_from_slice).map(Ok::<_, ()>),
            ))
            .try_collect::<Vec<_>>()
            .await
            .unwrap();
            assert_eq!(chunked, whole, "chunk size {size}");
        }
    }

    #[tokio::test]
    async fn empty_and_whitespace_frames_are_skipped() {
        assert_eq!(
            collect(vec![b"\n\n\n\n  \n\ndata: x\n\n"]).await,
            vec![ev("message", "x")]
        );
    }

    #[tokio::test]
    async fn comment_only_frame_dispatches_default_event() {
        assert_eq!(
            collect(vec![b": keepalive\n\n"]).await,
            vec![ev("message", "")]
        );
    }

    #[tokio::test]
    async fn unrecognized_fields_still_dispatch() {
        assert_eq!(collect(vec![b"id: 1\n\n"]).await, vec![ev("message", "")]);
    }

    #[tokio::test]
    async fn carriage_returns_are_ordinary_content() {
        // frames split on \n\n only, a CR stays in the data
        assert_eq!(
            collect(vec![b"data: x\r\n\n"]).await,
            vec![ev("message", "x\r")]
        );
    }

    #[tokio::test]
    async fn trailing_partial_frame_is_discarded() {
        assert_eq!(
            collect(vec![b"data: kept\n\ndata: dropped"]).await,
            vec![ev("message", "kept")]
        );
    }

    #[tokio::test]
    async fn no_trailing_boundary_means_no_event() {
        assert_eq!(collect(vec![b"data: never terminated\n"]).await, vec![]);
    }

    #[tokio::test]
    async fn bom_is_stripped_before_framing() {
        assert_eq!(
            collect(vec![b"\xEF\xBB\xBFevent: status\ndata: ok\n\n"]).await,
            vec![ev("status", "ok")]
        );
    }

    #[tokio::test]
    async fn transport_errors_pass_through() {
        let results = EventStream::new(futures::stream::iter(vec![
            Ok::<_, &str>(Bytes::from_static(b"data: one\n\n")),
            Err("connection reset"),
            Ok::<_, &str>(Bytes::from_static(b"data: two\n\n")),
        ]))
        .collect::<Vec<_>>()
        .await;
        assert_eq!(
            results,
            vec![
                Ok(ev("message", "one")),
                Err("connection reset"),
                Ok(ev("message", "two")),
            ]
        );
    }

    #[tokio::test]
    async fn retrieval_chat_session_parses_in_order() {
        let events = collect(vec![
            b"event: status\ndata: Query received. Checking for tools...\n\n",
            b"event: status\ndata: Retrieving relevant documents...\n\n",
            b"event: retrieved_sources\ndata: [{\"title\": \"Annual Report 2023\", \"page\": 5}]\n\n",
            b"event: token\ndata: Based\n\nevent: token\ndata:  on\n\n",
            b"event: citation\ndata: [Source: Annual Report 2023, p. 10]\n\n",
            b"event: end\ndata: Simulation complete.\n\n",
        ])
        .await;

        assert_eq!(events.len(), 7);
        assert_eq!(
            events.iter().map(Event::kind).collect::<Vec<_>>(),
            vec![
                EventKind::Status,
                EventKind::Status,
                EventKind::RetrievedSources,
                EventKind::Token,
                EventKind::Token,
                EventKind::Citation,
                EventKind::End,
            ]
        );
        assert_eq!(events[3], ev("token", "Based"));
        // "data: " consumes one space, the rest of the payload is verbatim
        assert_eq!(events[4], ev("token", " on"));
        assert!(events[6].kind().is_terminal());
    }
}
