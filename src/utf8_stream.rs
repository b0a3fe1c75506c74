//! Incremental UTF-8 decoding over a byte stream.
//!
//! Chunk boundaries are arbitrary, a multi-byte character may be split across
//! two reads. [`Utf8Stream`] carries the undecoded suffix between polls so the
//! text it emits is identical no matter how the bytes were chunked.

use bytes::{Buf, Bytes, BytesMut};
use bytes_utils::Str;

use core::pin::Pin;
use core::task::ready;
use futures_core::stream::Stream;
use futures_core::task::{Context, Poll};
use pin_project_lite::pin_project;

use crate::constants::{BOM, REPLACEMENT};

pin_project! {
    /// Decoder [`Stream`] adapter: bytes in, [`Str`] chunks out.
    ///
    /// Decoding is lossy. Bytes that can never form valid UTF-8 become U+FFFD
    /// instead of an error, so the only error this stream yields is the
    /// underlying transport's. A byte-order mark at the very start of the
    /// stream is stripped. An incomplete multi-byte sequence still pending
    /// when the source ends is discarded.
    pub struct Utf8Stream<S> {
        #[pin]
        state: Utf8StreamState<S>,
    }
}

pin_project! {
    #[project = Utf8StreamProjection]
    pub enum Utf8StreamState<S> {
        Active {
            #[pin]
            stream: S,
            buffer: BytesMut,
            bom_checked: bool,
        },
        Terminated,
    }
}

impl<S> Utf8Stream<S> {
    pub fn new(stream: S) -> Self {
        let state = Utf8StreamState::Active {
            stream,
            buffer: BytesMut::new(),
            bom_checked: false,
        };
        Self { state }
    }
}

/// [None] while the buffer is still a strict prefix of the BOM and the answer
/// could go either way.
fn starts_with_bom(buffer: &[u8]) -> Option<bool> {
    if buffer.len() >= BOM.len() {
        Some(buffer.starts_with(BOM))
    } else if BOM.starts_with(buffer) {
        None
    } else {
        Some(false)
    }
}

/// Length of a truncated multi-byte sequence at the end of `buffer`, 0 if the
/// buffer ends on a character boundary (or on bytes that are invalid outright
/// and should be replaced rather than waited for).
fn incomplete_tail_len(buffer: &[u8]) -> usize {
    let len = buffer.len();
    for back in 1..=3.min(len) {
        let byte = buffer[len - back];
        if byte & 0b1100_0000 == 0b1000_0000 {
            // continuation byte, keep walking towards the lead
            continue;
        }
        let needed = match byte {
            0xF0..=0xF4 => 4,
            0xE0..=0xEF => 3,
            0xC2..=0xDF => 2,
            // ascii, or a lead that can never start a valid sequence and
            // should be replaced now rather than waited for
            _ => 0,
        };
        return if needed > back { back } else { 0 };
    }
    0
}

/// Split everything decodable off the front of `buffer` and decode it lossily,
/// leaving at most one truncated sequence behind.
fn decode_available(buffer: &mut BytesMut) -> Str {
    let tail_len = incomplete_tail_len(buffer);
    let ready = buffer.split_to(buffer.len() - tail_len).freeze();

    match str::from_utf8(&ready) {
        // Safety: we just checked the bytes are valid utf8
        Ok(_) => unsafe { Str::from_inner_unchecked(ready) },
        Err(_) => {
            let mut decoded = String::with_capacity(ready.len());
            let mut rest = ready.as_ref();
            loop {
                match str::from_utf8(rest) {
                    Ok(valid) => {
                        decoded.push_str(valid);
                        break;
                    }
                    Err(e) => {
                        let (valid, bad) = rest.split_at(e.valid_up_to());
                        // Safety: valid_up_to marks the end of the valid prefix
                        decoded.push_str(unsafe { str::from_utf8_unchecked(valid) });
                        decoded.push(REPLACEMENT);
                        // error_len is always known here since the truncated
                        // tail was held back above
                        let skip = e.error_len().unwrap_or(bad.len());
                        rest = &bad[skip..];
                    }
                }
            }
            // Safety: built from a String, valid by construction
            unsafe { Str::from_inner_unchecked(Bytes::from(decoded.into_bytes())) }
        }
    }
}

impl<S, E, B> Stream for Utf8Stream<S>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    type Item = Result<Str, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context) -> Poll<Option<Self::Item>> {
        let mut this = self.project();
        loop {
            let (stream_res, buffer, bom_checked) = match this.state.as_mut().project() {
                Utf8StreamProjection::Active {
                    stream,
                    buffer,
                    bom_checked,
                } => (ready!(stream.poll_next(cx)), buffer, bom_checked),
                Utf8StreamProjection::Terminated => return Poll::Ready(None),
            };

            match stream_res {
                Some(Ok(bytes)) => {
                    buffer.extend_from_slice(bytes.as_ref());

                    if !*bom_checked {
                        match starts_with_bom(buffer) {
                            // undecided until three bytes have arrived
                            None => continue,
                            Some(true) => {
                                *bom_checked = true;
                                buffer.advance(BOM.len());
                            }
                            Some(false) => *bom_checked = true,
                        }
                    }

                    return Poll::Ready(Some(Ok(decode_available(buffer))));
                }
                Some(Err(err)) => return Poll::Ready(Some(Err(err))),
                None => {
                    // whatever is left is a truncated sequence that never
                    // completed, a streaming decoder that is never flushed
                    // drops it
                    this.state.set(Utf8StreamState::Terminated);
                    return Poll::Ready(None);
                }
            }
        }
    }
}
