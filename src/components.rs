use super::{error::Error, host::decode_host, query::Query};

/// The pieces of a URL, as produced by [`parse`](fn.parse.html) and consumed
/// by [`build`](fn.build.html).
///
/// A component is `Some` only when it occurs in the input; empty components
/// are reported as `None`.  The `scheme` and `host` are lower-case, and the
/// host is kept in its ASCII form (see [`display_host`](#method.display_host)
/// for the Unicode form).
///
/// `path` is relative to the `/` which follows the authority, so
/// `http://example.com/a/b` has the path `a/b`.
///
/// `domain`, `subdomain` and `ip` describe the host in more detail and are
/// ignored by [`build`](fn.build.html); `name` is the last segment of a
/// `file` URL's path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_::Serialize, serde_::Deserialize),
    serde(crate = "serde_", default)
)]
pub struct UrlComponents {
    /// The scheme, such as `http`.
    pub scheme: Option<String>,
    /// The decoded user name.
    pub user: Option<String>,
    /// The decoded password.
    pub pass: Option<String>,
    /// The host name or IPv4 address.
    pub host: Option<String>,
    /// The explicit (or, with `add_port`, default) port.
    pub port: Option<u16>,
    /// The path below the root.
    pub path: Option<String>,
    /// The query, decoded into variables by the HTTP parser.
    pub query: Option<Query>,
    /// The fragment, without the `#`.
    pub fragment: Option<String>,
    /// The registrable `label.tld` part of a host name.
    pub domain: Option<String>,
    /// The labels in front of `domain`.
    pub subdomain: Option<String>,
    /// The host, when it is an IPv4 address.
    pub ip: Option<String>,
    /// The final path segment of a `file` URL.
    pub name: Option<String>,
}

impl UrlComponents {
    /// The host with any `xn--` labels converted back to Unicode.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCharacter`] if a label is not valid Punycode.
    pub fn display_host(&self) -> Result<Option<String>, Error> {
        self.host.as_deref().map(decode_host).transpose()
    }
}
