//! Frame-level parsing for the event-stream wire format.
//!
//! A frame is the text between two `\n\n` boundaries. Within a frame the only
//! recognized lines are comments (leading `:`), `event: ` and `data: `.
//! Everything else is ignored rather than rejected, the parser is permissive.

use memchr::memmem;

use crate::constants::{COMMENT_BYTE, DATA_PREFIX, DEFAULT_EVENT, EVENT_PREFIX, FRAME_BOUNDARY};
use crate::event::Event;

/// Byte offset of the next frame boundary in `buffer`, if a complete frame is
/// present. The frame is `buffer[..pos]`, the boundary itself is two bytes.
pub(crate) fn find_frame_boundary(buffer: &str) -> Option<usize> {
    memmem::find(buffer.as_bytes(), FRAME_BOUNDARY)
}

/// Parse one frame into an [`Event`].
///
/// Returns [`None`] for frames that are empty or whitespace-only, those are
/// skipped entirely. Any other frame yields an event, even if no line in it was
/// a recognized field: `event` falls back to `"message"` and `data` to `""`.
///
/// Field rules, applied per line in order:
/// - a leading `:` marks a comment, the line is skipped
/// - `event: ` sets the event name to the trimmed remainder, the last
///   occurrence in a frame wins
/// - `data: ` appends the raw remainder, separated from already-collected data
///   by a single `\n`
pub fn parse_frame(frame: &str) -> Option<Event> {
    if frame.trim().is_empty() {
        return None;
    }

    let mut event = String::from(DEFAULT_EVENT);
    let mut data = String::new();

    for line in frame.split('\n') {
        if line.as_bytes().first() == Some(&COMMENT_BYTE) {
            continue;
        }

        if let Some(rest) = line.strip_prefix(EVENT_PREFIX) {
            event = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(DATA_PREFIX) {
            if !data.is_empty() {
                data.push('\n');
            }
            data.push_str(rest);
        }
    }

    Some(Event { event, data })
}
