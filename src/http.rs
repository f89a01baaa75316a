//! The parser for `http` and `https` URLs.

use super::{
    character_classes::has_invalid_characters,
    codec::{decode_if_encoded, encode_element, encode_segments, FRAGMENT},
    components::UrlComponents,
    error::Error,
    grammar::GenericMatch,
    options::ParseOptions,
    query::{build_query, parse_query, Query},
    scheme::{build_authority, Scheme},
};
use once_cell::sync::Lazy;
use regex::Regex;

static URLPATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:/(?P<path>[^?#]*))?(?:\?(?P<query>[^#]*))?(?:#(?P<fragment>.*))?$").unwrap()
});

pub(crate) fn parse(generic: GenericMatch, options: &ParseOptions) -> Result<UrlComponents, Error> {
    let captures = URLPATH
        .captures(&generic.urlpath)
        .ok_or(Error::InvalidUrl)?;
    let capture = |name| {
        captures
            .name(name)
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
    };
    let path = capture("path").map(decode_if_encoded);
    let query = capture("query")
        .map(parse_query)
        .filter(|vars| !vars.is_empty())
        .map(Query::Decoded);
    let fragment = capture("fragment").map(decode_if_encoded);
    tracing::trace!(?path, ?query, ?fragment, "split HTTP path");

    let mut components = UrlComponents {
        scheme: generic.scheme,
        user: generic.user,
        pass: generic.pass,
        host: generic.host,
        port: generic.port,
        path,
        query,
        fragment,
        domain: generic.domain,
        subdomain: generic.subdomain,
        ip: generic.ip,
        name: None,
    };

    if components.user.is_some() && !options.allow_login {
        if !options.fix {
            return Err(Error::LoginNotAllowed);
        }
        tracing::debug!("dropping user name and password");
        components.user = None;
        components.pass = None;
    }

    if options.add_port && components.port.is_none() {
        components.port = match components.scheme.as_deref() {
            Some("https") => Some(443),
            _ => Some(80),
        };
    }

    if components.host.is_none() {
        if !options.fix {
            return Err(Error::MissingHost);
        }
        tracing::debug!("substituting localhost for missing host");
        components.host = Some("localhost".into());
    }

    Ok(components)
}

pub(crate) fn build(components: &UrlComponents, scheme: Scheme) -> Result<String, Error> {
    let mut url = build_authority(components, scheme)?;
    if let Some(path) = &components.path {
        url.push('/');
        url.push_str(&encode_path(path));
    }
    if let Some(query) = components.query.as_ref().filter(|query| !query.is_empty()) {
        url.push('?');
        url.push_str(
            &build_query(&query.to_map())
                .replace("%5B", "[")
                .replace("%5D", "]"),
        );
    }
    if let Some(fragment) = &components.fragment {
        url.push('#');
        if has_invalid_characters(fragment) || fragment.contains(['%', '#']) {
            url.push_str(&encode_element(fragment, FRAGMENT));
        } else {
            url.push_str(fragment);
        }
    }
    Ok(url)
}

/// The path is written below the root `/`, so a leading slash of its own
/// has to be encoded to survive.  A path holding `%`, `?` or `#` is decoded
/// and gets encoded again.
fn encode_path(path: &str) -> String {
    let path = if has_invalid_characters(path) || path.contains(['%', '?', '#']) {
        encode_segments(path)
    } else {
        path.to_owned()
    };
    match path.strip_prefix('/') {
        Some(rest) => format!("%2F{}", rest),
        None => path,
    }
}
