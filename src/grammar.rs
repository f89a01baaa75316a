//! The grammar common to every supported scheme.
//!
//! [`match_generic`] recognises
//! `[scheme://][user[:pass]@][host[:port]]<urlpath>` where the host is an
//! IPv4 address, `localhost` or a sequence of domain labels, and leaves the
//! `urlpath` remainder for the scheme parsers to take apart.
//!
//! [`split_reference`] is the lenient RFC 3986 appendix B splitter.  It
//! accepts any string and is used to repair URLs before matching them, and
//! by the [`Uri`](../struct.Uri.html) value object.

use super::{
    character_classes::has_invalid_characters,
    codec::{decode_if_encoded, encode_disallowed},
    error::Error,
    host::encode_host,
    options::ParseOptions,
};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A domain label: alphanumerics, with hyphens allowed inside.
const LABEL: &str = "[a-z0-9]+(?:[a-z0-9-]*[a-z0-9])?";

/// The rightmost label never starts with a digit, which tells host names
/// and IPv4 addresses apart.
const TLD: &str = "[a-z]+(?:[a-z0-9-]*[a-z0-9])?";

static GENERIC: Lazy<Regex> = Lazy::new(|| {
    let host = format!(
        r"(?P<ip>[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+)|(?:(?P<subdomain>(?:{LABEL}\.)*{LABEL})\.)?(?:localhost|(?P<domain>{LABEL}\.{TLD}))"
    );
    let pattern = format!(
        r"(?i)^(?:(?P<scheme>[a-z0-9+.-]+)://)?(?:(?P<user>[^:/@]+)(?::(?P<pass>[^:/@]+))?@)?(?:(?P<host>(?:{host})?)(?::(?P<port>[0-9]+))?)?(?P<urlpath>.*)$"
    );
    Regex::new(&pattern).unwrap()
});

static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?").unwrap()
});

/// The components recognised by the generic grammar.  Empty captures are
/// `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct GenericMatch {
    pub scheme: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub host: Option<String>,
    pub ip: Option<String>,
    pub domain: Option<String>,
    pub subdomain: Option<String>,
    pub port: Option<u16>,
    pub urlpath: String,
}

/// Match `raw` against the generic URL grammar.
///
/// Backslashes are treated as forward slashes.  A URL with characters
/// outside the RFC 3986 set is rejected, or repaired first if `options.fix`
/// is set.  `user` and `pass` come back percent-decoded if they were
/// encoded; the scheme and host come back lower-cased.
pub(crate) fn match_generic(raw: &str, options: &ParseOptions) -> Result<GenericMatch, Error> {
    let mut url = raw.replace('\\', "/");
    if has_invalid_characters(&url) {
        if !options.fix {
            return Err(Error::InvalidCharacter);
        }
        url = sanitise(&url)?;
        tracing::debug!(raw, sanitised = %url, "encoded invalid characters");
        if has_invalid_characters(&url) {
            return Err(Error::InvalidCharacter);
        }
    }

    let captures = GENERIC.captures(&url).ok_or(Error::InvalidUrl)?;
    let urlpath = captures.name("urlpath").map_or("", |m| m.as_str());
    if urlpath == url {
        return Err(Error::InvalidUrl);
    }
    let port = match capture(&captures, "port") {
        Some(port) => match port.parse::<u16>() {
            Ok(0) | Err(_) => return Err(Error::InvalidUrl),
            Ok(port) => Some(port),
        },
        None => None,
    };
    let lowercase = |name| capture(&captures, name).map(|s| s.to_ascii_lowercase());
    let generic = GenericMatch {
        scheme: lowercase("scheme"),
        user: capture(&captures, "user").map(|s| decode_if_encoded(&s)),
        pass: capture(&captures, "pass").map(|s| decode_if_encoded(&s)),
        host: lowercase("host"),
        ip: capture(&captures, "ip"),
        domain: lowercase("domain"),
        subdomain: lowercase("subdomain"),
        port,
        urlpath: urlpath.to_owned(),
    };
    tracing::trace!(?generic, "matched generic grammar");
    Ok(generic)
}

fn capture(captures: &Captures<'_>, name: &str) -> Option<String> {
    captures
        .name(name)
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

/// The five components of an RFC 3986 URI reference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Reference<'a> {
    pub scheme: Option<&'a str>,
    pub authority: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub fragment: Option<&'a str>,
}

/// The parts of an authority: `[user_info@]host[:port]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct AuthorityParts<'a> {
    pub user_info: Option<&'a str>,
    pub host: &'a str,
    pub port: Option<&'a str>,
}

/// Split any string into scheme, authority, path, query and fragment.
pub(crate) fn split_reference(s: &str) -> Reference<'_> {
    // The pattern can match the empty string, so it matches everything.
    let Some(captures) = REFERENCE.captures(s) else {
        return Reference {
            path: s,
            ..Reference::default()
        };
    };
    let get = |i| captures.get(i).map(|m| m.as_str());
    Reference {
        scheme: get(1),
        authority: get(2),
        path: get(3).unwrap_or(""),
        query: get(4),
        fragment: get(5),
    }
}

/// Split an authority at the last `@` and at a trailing `:digits`.
pub(crate) fn split_authority(authority: &str) -> AuthorityParts<'_> {
    let (user_info, host_port) = match authority.rsplit_once('@') {
        Some((user_info, host_port)) => (Some(user_info), host_port),
        None => (None, authority),
    };
    let (host, port) = match host_port.rsplit_once(':') {
        Some((host, port)) if port.bytes().all(|b| b.is_ascii_digit()) => {
            (host, Some(port).filter(|port| !port.is_empty()))
        }
        _ => (host_port, None),
    };
    AuthorityParts {
        user_info,
        host,
        port,
    }
}

/// Make a URL acceptable to the generic grammar: IDN-encode a host with
/// characters outside the RFC 3986 set and percent-encode every other run
/// of illegal characters.  The structure of the URL is left as it was.
fn sanitise(url: &str) -> Result<String, Error> {
    // Without a scheme, the URL is read as starting with its host.
    let schemeless = !url.contains("://");
    let prefixed;
    let target = if schemeless {
        prefixed = format!("//{url}");
        prefixed.as_str()
    } else {
        url
    };
    let reference = split_reference(target);

    let mut sanitised = String::with_capacity(url.len() * 2);
    if let Some(scheme) = reference.scheme {
        sanitised.push_str(&encode_disallowed(scheme, false));
        sanitised.push(':');
    }
    if let Some(authority) = reference.authority {
        if !schemeless {
            sanitised.push_str("//");
        }
        let parts = split_authority(authority);
        if let Some(user_info) = parts.user_info {
            sanitised.push_str(&encode_disallowed(user_info, false));
            sanitised.push('@');
        }
        if has_invalid_characters(parts.host) {
            sanitised.push_str(&encode_host(parts.host)?);
        } else {
            sanitised.push_str(parts.host);
        }
        if let Some(port) = parts.port {
            sanitised.push(':');
            sanitised.push_str(port);
        }
    }
    sanitised.push_str(&encode_disallowed(reference.path, false));
    if let Some(query) = reference.query {
        sanitised.push('?');
        sanitised.push_str(&encode_disallowed(query, true));
    }
    if let Some(fragment) = reference.fragment {
        sanitised.push('#');
        sanitised.push_str(&encode_disallowed(fragment, false));
    }
    Ok(sanitised)
}
