/// Boundary between two frames in the decoded text stream.
pub(crate) const FRAME_BOUNDARY: &[u8; 2] = b"\n\n";

/// Recognized field prefixes. The space is part of the prefix, a line like
/// `data:x` is not a data field and is ignored.
pub(crate) const EVENT_PREFIX: &str = "event: ";
pub(crate) const DATA_PREFIX: &str = "data: ";
pub(crate) const COMMENT_BYTE: u8 = b':';

/// Event name used when a frame carries no `event: ` field.
pub(crate) const DEFAULT_EVENT: &str = "message";

const BOM_CHAR: char = '\u{FEFF}';
const BOM_LEN: usize = BOM_CHAR.len_utf8();
// bom           = %xFEFF ; U+FEFF BYTE ORDER MARK
pub(crate) const BOM: &[u8; BOM_LEN] = &{
    let mut buf = [0u8; BOM_LEN];
    BOM_CHAR.encode_utf8(&mut buf);
    buf
};

/// Emitted in place of bytes that are not valid UTF-8.
pub(crate) const REPLACEMENT: char = '\u{FFFD}';
