//! Events produced by a retrieval-chat answer stream.

/// One parsed frame from the wire.
///
/// `event` defaults to `"message"` when the frame carries no `event: ` field,
/// `data` is the frame's `data: ` lines joined with `\n` (empty when there are
/// none).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub event: String,
    pub data: String,
}

impl Event {
    /// Classify by the `event` field. Matches are exact and case sensitive,
    /// `"Status"` or `"STATUS"` fall through to [`EventKind::Other`].
    pub fn kind(&self) -> EventKind {
        match self.event.as_str() {
            "status" => EventKind::Status,
            "retrieved_sources" => EventKind::RetrievedSources,
            "token" => EventKind::Token,
            "citation" => EventKind::Citation,
            "end" => EventKind::End,
            _ => EventKind::Other,
        }
    }
}

/// The event types a retrieval-chat stream emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Pipeline progress notes ("Retrieving relevant documents...").
    Status,
    /// The documents the answer will draw from, as one JSON payload.
    RetrievedSources,
    /// A partial answer fragment, rendered without a line break.
    Token,
    /// A source citation for the generated answer.
    Citation,
    /// Terminal event. Nothing after it is read.
    End,
    /// Any event name this client does not know.
    Other,
}

impl EventKind {
    /// Whether dispatching this event ends the read loop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::End)
    }
}
