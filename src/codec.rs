//! Percent-encoding and decoding of URL components.

use super::character_classes::{is_allowed_char, is_triplet, looks_already_encoded};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::borrow::Cow;

/// Form encoding: everything but ASCII alphanumerics and `-`, `_`, `.` is
/// encoded.  Spaces are additionally turned into `+` by [`urlencode`].
pub const FORM: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// User names and passwords keep unreserved characters and sub-delims.
pub const USER_INFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// A single path segment (`pchar` from RFC 3986).
pub const PATH_SEGMENT: &AsciiSet = &USER_INFO.remove(b':').remove(b'@');

/// Fragments may also carry `/` and `?`.
pub const FRAGMENT: &AsciiSet = &PATH_SEGMENT.remove(b'/').remove(b'?');

/// Encode a string the way HTML forms do: `+` for spaces, `%XX` for every
/// byte outside [`FORM`].
#[must_use]
pub fn urlencode(s: &str) -> String {
    utf8_percent_encode(s, FORM).to_string().replace("%20", "+")
}

/// Inverse of [`urlencode`]: `+` becomes a space and `%XX` triplets are
/// decoded.  Byte sequences which are not UTF-8 are replaced.
#[must_use]
pub fn urldecode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_decode_str(&s).decode_utf8_lossy().into_owned()
}

/// Percent-encode every byte of `element` contained in `set`.
#[must_use]
pub fn encode_element(element: &str, set: &'static AsciiSet) -> String {
    utf8_percent_encode(element, set).to_string()
}

/// Encode every `/`-separated segment of a decoded path with
/// [`PATH_SEGMENT`], so a literal `%`, `?` or `#` survives the next parse.
#[must_use]
pub fn encode_segments(path: &str) -> String {
    path.split('/')
        .map(|segment| encode_element(segment, PATH_SEGMENT))
        .collect::<Vec<_>>()
        .join("/")
}

/// Decode `element` only if it [looks already
/// encoded](../character_classes/fn.looks_already_encoded.html), so nothing is
/// ever decoded twice.  If decoding would not produce UTF-8 the element is
/// returned unchanged.
#[must_use]
pub fn decode_if_encoded(element: &str) -> String {
    if !looks_already_encoded(element) {
        return element.to_owned();
    }
    match percent_decode_str(element).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => element.to_owned(),
    }
}

/// Percent-encode every run of characters which may not appear in a URL,
/// leaving allowed characters and valid `%XX` triplets alone.  A `%` which
/// does not start a triplet is encoded as `%25`.
///
/// With `space_as_plus`, spaces become `+` as in form encoding.
#[must_use]
pub fn encode_disallowed(s: &str, space_as_plus: bool) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let keep = |offset: usize, c: char| {
        if c == '%' {
            is_triplet(bytes, offset)
        } else {
            is_allowed_char(c)
        }
    };
    if s.char_indices().all(|(offset, c)| keep(offset, c)) {
        return Cow::Borrowed(s);
    }
    let encode_run = |run: &str| {
        let encoded = utf8_percent_encode(run, NON_ALPHANUMERIC).to_string();
        if space_as_plus {
            encoded.replace("%20", "+")
        } else {
            encoded
        }
    };
    let mut encoded = String::with_capacity(s.len() * 3);
    let mut run_start = None;
    for (offset, c) in s.char_indices() {
        match (keep(offset, c), run_start) {
            (true, Some(start)) => {
                encoded.push_str(&encode_run(&s[start..offset]));
                run_start = None;
                encoded.push(c);
            }
            (true, None) => encoded.push(c),
            (false, None) => run_start = Some(offset),
            (false, Some(_)) => (),
        }
    }
    if let Some(start) = run_start {
        encoded.push_str(&encode_run(&s[start..]));
    }
    Cow::Owned(encoded)
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn form_encoding() {
        struct Test {
            decoded: &'static str,
            encoded: &'static str,
        }
        let test_vectors: &[Test] = &[
            Test {
                decoded: "Bob Smith",
                encoded: "Bob+Smith",
            },
            Test {
                decoded: "5/12/1956",
                encoded: "5%2F12%2F1956",
            },
            Test {
                decoded: "user[name]",
                encoded: "user%5Bname%5D",
            },
            Test {
                decoded: "föø",
                encoded: "f%C3%B6%C3%B8",
            },
            Test {
                decoded: "a-b_c.d",
                encoded: "a-b_c.d",
            },
            Test {
                decoded: "100% + 1",
                encoded: "100%25+%2B+1",
            },
        ];
        for test_vector in test_vectors {
            assert_eq!(test_vector.encoded, urlencode(test_vector.decoded));
            assert_eq!(test_vector.decoded, urldecode(test_vector.encoded));
        }
    }

    #[test]
    fn user_info_encoding() {
        assert_eq!("sec%3Aret%3F", encode_element("sec:ret?", USER_INFO));
        assert_eq!("some%C3%BCser", encode_element("someüser", USER_INFO));
        assert_eq!("a%40b%2Fc", encode_element("a@b/c", USER_INFO));
    }

    #[test]
    fn path_segment_keeps_sub_delims() {
        assert_eq!("disk$user", encode_element("disk$user", PATH_SEGMENT));
        assert_eq!("test-%C3%A4rticle", encode_element("test-ärticle", PATH_SEGMENT));
        assert_eq!("a%20b", encode_element("a b", PATH_SEGMENT));
        assert_eq!("a%2Fb", encode_element("a/b", PATH_SEGMENT));
    }

    #[test]
    fn decode_only_once() {
        assert_eq!("test-ärticle", decode_if_encoded("test-%C3%A4rticle"));
        assert_eq!("a%20b", decode_if_encoded("a%2520b"));
        assert_eq!("plain", decode_if_encoded("plain"));
        assert_eq!("a%20b c", decode_if_encoded("a%20b c"));
        assert_eq!("%FF", decode_if_encoded("%FF"));
    }

    #[test]
    fn encode_runs_of_disallowed_characters() {
        struct Test {
            input: &'static str,
            space_as_plus: bool,
            output: &'static str,
        }
        let test_vectors: &[Test] = &[
            Test {
                input: "/index.php/test-ärticle",
                space_as_plus: false,
                output: "/index.php/test-%C3%A4rticle",
            },
            Test {
                input: "query=föø&öther=bær",
                space_as_plus: true,
                output: "query=f%C3%B6%C3%B8&%C3%B6ther=b%C3%A6r",
            },
            Test {
                input: "a b",
                space_as_plus: true,
                output: "a+b",
            },
            Test {
                input: "a b",
                space_as_plus: false,
                output: "a%20b",
            },
            Test {
                input: "100%",
                space_as_plus: false,
                output: "100%25",
            },
            Test {
                input: "already%20fine",
                space_as_plus: false,
                output: "already%20fine",
            },
        ];
        for test_vector in test_vectors {
            assert_eq!(
                test_vector.output,
                encode_disallowed(test_vector.input, test_vector.space_as_plus)
            );
        }
    }
}
