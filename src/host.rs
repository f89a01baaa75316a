//! Internationalised domain names.

use super::error::Error;
use idna::AsciiDenyList;
use std::borrow::Cow;

/// Convert a host with Unicode labels to its ASCII-compatible encoding
/// (Punycode, RFC 3492 / RFC 5891).
///
/// Hosts already in ASCII, including `xn--` labels, come back unchanged
/// apart from being lower-cased.
///
/// # Errors
///
/// [`Error::InvalidCharacter`] if the host cannot be converted, for example
/// because it contains a space.
///
/// ```rust
/// use uriclean::encode_host;
///
/// assert_eq!("xn--mltdmain-1za6p8bd.de", encode_host("ümläütdömain.de").unwrap());
/// assert_eq!("xn--mltdmain-1za6p8bd.de", encode_host("xn--mltdmain-1za6p8bd.de").unwrap());
/// ```
pub fn encode_host(host: &str) -> Result<String, Error> {
    idna::domain_to_ascii_cow(host.as_bytes(), AsciiDenyList::URL)
        .map(Cow::into_owned)
        .map_err(|error| {
            tracing::debug!(?error, host, "unable to encode host");
            Error::InvalidCharacter
        })
}

/// Convert ACE (`xn--`) labels of a host back to Unicode, for display.
///
/// # Errors
///
/// [`Error::InvalidCharacter`] if a label is not valid Punycode.
pub fn decode_host(host: &str) -> Result<String, Error> {
    let (decoded, result) = idna::domain_to_unicode(host);
    match result {
        Ok(()) => Ok(decoded),
        Err(error) => {
            tracing::debug!(?error, host, "unable to decode host");
            Err(Error::InvalidCharacter)
        }
    }
}
