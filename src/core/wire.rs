//! Text rewrites applied to the XLIFF documents exchanged with the platform.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static SOURCE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<source>(?:[^<]*/)?[^</.]*\.([^<]*)</source>").expect("source prefix pattern")
});

static TRANS_UNIT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<trans-unit id="([^"]*)""#).expect("trans-unit id pattern"));

/// Drops the path and first dotted segment from every `<source>` element,
/// so `folder/file.msgkey` and `messages.msgkey` both become `msgkey`.
pub fn strip_source_prefixes(content: &str) -> String {
    SOURCE_PREFIX
        .replace_all(content, "<source>$1</source>")
        .into_owned()
}

/// Prefixes every trans-unit id with `domain.`.
pub fn namespace_unit_ids(content: &str, domain: &str) -> String {
    TRANS_UNIT_ID
        .replace_all(content, |caps: &Captures| {
            format!("<trans-unit id=\"{}.{}\"", domain, &caps[1])
        })
        .into_owned()
}
