/// This enumerates the components of a URL, so that an [`Error`] can say
/// which one it is complaining about.
///
/// [`Error`]: enum.Error.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    /// The scheme, such as `http` or `file`.
    Scheme,

    /// The `user[:pass]` part in front of the host.
    UserInfo,

    /// The host name or IPv4 address.
    Host,

    /// The port number following the host.
    Port,

    /// The path following the authority.
    Path,

    /// The query, after the `?`.
    Query,

    /// The fragment, after the `#`.
    Fragment,
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Context::Scheme => "scheme",
            Context::UserInfo => "user info",
            Context::Host => "host",
            Context::Port => "port",
            Context::Path => "path",
            Context::Query => "query",
            Context::Fragment => "fragment",
        };
        f.write_str(name)
    }
}
