//! Captured-output hygiene.
//!
//! Scheduled commands can emit colored escape sequences and arbitrarily
//! large output; both end up in log lines, so raw bytes are ANSI-stripped
//! and clipped to a bounded length before they leave this crate.

/// Default maximum characters of captured output kept per stream.
pub const DEFAULT_MAX_OUTPUT_CHARS: usize = 8_192;

/// Strip ANSI escape codes and convert bytes to a UTF-8 string.
pub fn clean(raw: &[u8]) -> String {
    let stripped = strip_ansi_escapes::strip(raw);
    String::from_utf8_lossy(&stripped).into_owned()
}

/// Clip `text` to at most `max_chars` characters, keeping the head.
///
/// Log consumers care about how a command started; the omission marker
/// records how much was dropped. Splitting is character-aware so multi-byte
/// sequences are never broken.
pub fn clip(text: &str, max_chars: usize) -> String {
    if text.len() <= max_chars {
        return text.to_owned();
    }

    let total = text.chars().count();
    if total <= max_chars {
        return text.to_owned();
    }

    let head: String = text.chars().take(max_chars).collect();
    let omitted = total - max_chars;
    format!("{head} [{omitted} chars omitted]")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
