// crates/faceforge-ui/src/helpers/format.rs
//
// UI-layer string utilities that don't belong in faceforge-core.
//
// Size and clock formatting live in faceforge_core::helpers::format — use
// those for anything involving bytes or seconds.  This module holds utilities
// that are purely about rendering strings in the UI and have no meaning
// outside of a display context.

/// Truncate `s` to at most `max` bytes without splitting a codepoint.
///
/// Used by the upload cards and the result panel to keep file names and URLs
/// from overflowing their fixed-width rows.
///
/// # Note on units
/// `max` is a *byte* count, not a character count.  For ASCII names (the
/// common case) the two are equivalent.  For multibyte characters the
/// returned slice may be shorter than `max` characters; it will never split
/// a codepoint.
pub fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    // Walk character boundaries until we exceed `max`, then step back one.
    s.char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max)
        .last()
        .map(|i| &s[..i])
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_is_unchanged() {
        assert_eq!(truncate("voice.wav", 20), "voice.wav");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn long_ascii_is_clipped() {
        assert_eq!(truncate("hello world", 5), "hello");
    }

    #[test]
    fn empty_input() {
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn multibyte_does_not_split_codepoint() {
        // "é" is two bytes (0xC3 0xA9). max=1 must not split it.
        let s = "élan";
        let t = truncate(s, 1);
        assert!(std::str::from_utf8(t.as_bytes()).is_ok());
        assert!(t.is_empty() || t == "é" || t.len() <= 1);
    }
}
