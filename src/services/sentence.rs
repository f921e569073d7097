//! Sentence context extraction.

/// Bytes that end a sentence for context purposes.
const fn is_boundary(byte: u8) -> bool {
    matches!(byte, b'.' | b'!' | b'?' | b'\n')
}

/// Return the trimmed sentence enclosing byte offset `position`.
///
/// Scans back to the previous terminator (`.`, `!`, `?`) or newline and
/// forward to the next one, keeping the forward terminator. Boundaries are
/// ASCII, so the slice always falls on char boundaries. Offsets past the end
/// are clamped.
pub fn extract_sentence(text: &str, position: usize) -> String {
    let bytes = text.as_bytes();
    let position = position.min(bytes.len());

    let start = bytes[..position]
        .iter()
        .rposition(|&b| is_boundary(b))
        .map_or(0, |i| i + 1);

    let end = bytes[position..]
        .iter()
        .position(|&b| is_boundary(b))
        .map_or(bytes.len(), |i| position + i + 1);

    text[start..end].trim().to_string()
}
