//! Anchors for `\addindex` entries.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use folio_core::doc::IndexEntry;

/// Bytes that are percent-encoded in an index anchor: everything except
/// ASCII alphanumerics and the URL-safe `-._~`.
const INDEX_WORD: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode an index word into a URL-safe anchor name.
pub fn index_word_to_anchor(word: &str) -> String {
    utf8_percent_encode(word, INDEX_WORD).to_string()
}

/// Anchor of an index entry, prefixed by the anchor of the member it
/// belongs to.
pub fn index_entry_anchor(entry: &IndexEntry) -> String {
    let anchor = index_word_to_anchor(&entry.entry);
    match entry.member_anchor.as_deref() {
        Some(member_anchor) => format!("{member_anchor}_{anchor}"),
        None => anchor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;
    use proptest::prelude::*;

    #[test]
    fn test_safe_characters_pass_through() {
        assert_eq!(index_word_to_anchor("Foo-bar.baz_1~"), "Foo-bar.baz_1~");
    }

    #[test]
    fn test_unsafe_characters_are_uppercase_hex() {
        assert_eq!(index_word_to_anchor("a b@c"), "a%20b%40c");
        assert_eq!(index_word_to_anchor("é"), "%C3%A9");
    }

    #[test]
    fn test_member_prefix() {
        let plain = IndexEntry::new("tree walk");
        assert_eq!(index_entry_anchor(&plain), "tree%20walk");

        let scoped = IndexEntry::new("walk").in_member("Tree", "visit", "a3f2");
        assert_eq!(index_entry_anchor(&scoped), "a3f2_walk");
    }

    proptest! {
        #[test]
        fn prop_anchor_decodes_to_word(word in "\\PC{0,24}") {
            let anchor = index_word_to_anchor(&word);
            prop_assert!(anchor
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"-._~%".contains(&b)));

            let decoded: Vec<u8> = percent_decode_str(&anchor).collect();
            prop_assert_eq!(decoded, word.as_bytes().to_vec());
        }
    }
}
