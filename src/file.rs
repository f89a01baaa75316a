//! The parser for `file` URLs.
//!
//! File URLs may carry credentials and may leave out the host, which then
//! means the local machine.  The path is split into its directories and a
//! final `name`.

use super::{
    codec::{decode_if_encoded, encode_segments},
    components::UrlComponents,
    error::Error,
    grammar::GenericMatch,
    scheme::{build_authority, Scheme},
};
use once_cell::sync::Lazy;
use regex::Regex;

static URLPATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:/(?P<path>(?:[^/]*/)*(?P<name>[^/]+)?))?$").unwrap());

pub(crate) fn parse(generic: GenericMatch) -> Result<UrlComponents, Error> {
    let captures = URLPATH
        .captures(&generic.urlpath)
        .ok_or(Error::InvalidUrl)?;
    let capture = |name| {
        captures
            .name(name)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
            .map(decode_if_encoded)
    };
    let path = capture("path");
    let name = capture("name");
    tracing::trace!(?path, ?name, "split file path");
    Ok(UrlComponents {
        scheme: generic.scheme,
        user: generic.user,
        pass: generic.pass,
        host: generic.host,
        port: generic.port,
        path,
        query: None,
        fragment: None,
        domain: generic.domain,
        subdomain: generic.subdomain,
        ip: generic.ip,
        name,
    })
}

pub(crate) fn build(components: &UrlComponents, scheme: Scheme) -> Result<String, Error> {
    let mut url = build_authority(components, scheme)?;
    if let Some(path) = &components.path {
        let path = encode_segments(path);
        url.push('/');
        match path.strip_prefix('/') {
            Some(rest) => {
                url.push_str("%2F");
                url.push_str(rest);
            }
            None => url.push_str(&path),
        }
    }
    Ok(url)
}
