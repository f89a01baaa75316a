//! Character classification for URLs.
//!
//! A URL may only contain the characters listed in [RFC 3986 section
//! 2](https://tools.ietf.org/html/rfc3986#section-2) (unreserved, sub-delims
//! and gen-delims) plus `%XX` triplets.  Everything else has to be
//! percent-encoded.  Classification is done with explicit predicates and
//! never depends on the process locale.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Characters which may appear unencoded anywhere in a URL.
pub static ALLOWED: Lazy<HashSet<char>> = Lazy::new(|| {
    ('a'..='z')
        .chain('A'..='Z')
        .chain('0'..='9')
        .chain("-._~:/?#[]@!$&'()*+,;=".chars())
        .collect()
});

/// Determine whether the character may appear unencoded in a URL.
#[must_use]
pub fn is_allowed_char(c: char) -> bool {
    ALLOWED.contains(&c)
}

/// Determine whether the string contains anything other than allowed
/// characters and valid `%XX` triplets.
///
/// The empty string has no invalid characters.
#[must_use]
pub fn has_invalid_characters(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    for (offset, c) in s.char_indices() {
        if offset < i {
            // Inside a triplet that was already checked.
            continue;
        }
        if c == '%' {
            if !is_triplet(bytes, offset) {
                return true;
            }
            i = offset + 3;
        } else if !is_allowed_char(c) {
            return true;
        } else {
            i = offset + c.len_utf8();
        }
    }
    false
}

/// Determine whether the string holds at least one `%XX` triplet and
/// nothing invalid, meaning it was most likely percent-encoded already and
/// must not be encoded a second time.
#[must_use]
pub fn looks_already_encoded(s: &str) -> bool {
    let bytes = s.as_bytes();
    let has_triplet = (0..bytes.len()).any(|i| is_triplet(bytes, i));
    has_triplet && !has_invalid_characters(s)
}

/// Check for `%` followed by two hexadecimal digits at `offset`.
pub(crate) fn is_triplet(bytes: &[u8], offset: usize) -> bool {
    matches!(
        bytes.get(offset..offset + 3),
        Some([b'%', high, low]) if high.is_ascii_hexdigit() && low.is_ascii_hexdigit()
    )
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn allowed_characters() {
        for c in "az09AZ-._~:/?#[]@!$&'()*+,;=".chars() {
            assert!(is_allowed_char(c), "{}", c);
        }
        for c in " \"<>\\^`{|}%äß\u{7f}".chars() {
            assert!(!is_allowed_char(c), "{}", c);
        }
    }

    #[test]
    fn invalid_characters() {
        struct Test {
            input: &'static str,
            invalid: bool,
        }
        let test_vectors: &[Test] = &[
            Test {
                input: "",
                invalid: false,
            },
            Test {
                input: "http://www.example.com/path?var=value#fragment",
                invalid: false,
            },
            Test {
                input: "http://www.example.com/a%20b",
                invalid: false,
            },
            Test {
                input: "http://www.example.com/a%2",
                invalid: true,
            },
            Test {
                input: "http://www.example.com/a%zz",
                invalid: true,
            },
            Test {
                input: "This is not a URL",
                invalid: true,
            },
            Test {
                input: "http://ümläütdömain.de",
                invalid: true,
            },
            Test {
                input: "%41%42",
                invalid: false,
            },
        ];
        for (test_index, test_vector) in test_vectors.iter().enumerate() {
            assert_eq!(
                test_vector.invalid,
                has_invalid_characters(test_vector.input),
                "{}",
                test_index
            );
        }
    }

    #[test]
    fn already_encoded() {
        assert!(looks_already_encoded("test-%C3%A4rticle"));
        assert!(looks_already_encoded("%2Fabsolute/path"));
        assert!(!looks_already_encoded("plain/path"));
        assert!(!looks_already_encoded("a%20b c"));
        assert!(!looks_already_encoded("100%"));
        assert!(!looks_already_encoded(""));
    }
}
