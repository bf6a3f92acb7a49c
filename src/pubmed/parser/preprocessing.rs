//! Payload cleanup before splitting and decoding

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Remove inline formatting markup (`<i>`, `<sup>`, `<b>`, ...) from titles
/// and affiliations so they decode as plain text
///
/// Tags carrying attributes are removed as well. Structural elements are
/// left untouched.
pub(super) fn strip_inline_html_tags(xml: &str) -> Cow<'_, str> {
    static INLINE_TAG: OnceLock<Regex> = OnceLock::new();
    let re = INLINE_TAG.get_or_init(|| {
        Regex::new(r"</?(?:i|b|u|sup|sub|em|strong|italic|bold|underline)(?:\s[^<>]*)?>")
            .expect("inline tag pattern is valid")
    });

    let cleaned = re.replace_all(xml, "");
    if let Cow::Owned(ref s) = cleaned {
        debug!(
            removed_bytes = xml.len() - s.len(),
            "Stripped inline formatting tags"
        );
    }
    cleaned
}
