// Decoding of raw vendor message bodies into plain text.
// The vendor network embeds presentation markup directly in message bodies:
// ANSI-style escape sequences for bold/italic/color plus a handful of
// pseudo-HTML tags. The local protocol wants plain text only.

use regex::Regex;

lazy_static::lazy_static! {
    // ESC [ ... m color/style sequences
    static ref ESCAPE_SEQ: Regex = Regex::new("\x1b\\[[^m]*m").unwrap();
    // <font ...>, <fade ...>, <alt ...> and their closing forms
    static ref MARKUP_TAG: Regex = Regex::new(r"(?i)</?(font|fade|alt)[^>]*>").unwrap();
}

/// Converts a raw vendor message body into plain text.
pub trait TextDecoder {
    fn decode(&self, raw: &str) -> String;
}

/// The stock decoder: strips the vendor's inline formatting and trims the
/// result. Stateless, so one instance can serve every session.
#[derive(Debug, Default, Clone)]
pub struct VendorTextDecoder;

impl TextDecoder for VendorTextDecoder {
    fn decode(&self, raw: &str) -> String {
        let without_escapes = ESCAPE_SEQ.replace_all(raw, "");
        let without_tags = MARKUP_TAG.replace_all(&without_escapes, "");
        without_tags.trim().to_string()
    }
}
