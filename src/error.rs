use super::context::Context;

/// This is the enumeration of all the different kinds of errors which this
/// crate generates.
///
/// Every variant is an input validation failure; none of them leave the
/// process in a bad state, and none of them are retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The URL contains a character outside the RFC 3986 set which is not
    /// part of a `%XX` triplet, and it could not be repaired (either `fix`
    /// was not requested, or the host could not be IDN-encoded).
    #[error("URL contains invalid character(s)")]
    InvalidCharacter,

    /// The generic URL grammar could not make any sense of the input.
    #[error("URL could not be parsed")]
    InvalidUrl,

    /// No host could be found in an HTTP(S) URL.
    #[error("URL does not specify a host")]
    MissingHost,

    /// An HTTP(S) URL carries `user[:pass]@` and logins were not allowed.
    #[error("user name or password is not allowed")]
    LoginNotAllowed,

    /// There is no parser registered for the scheme.
    #[error("scheme {0} is not supported")]
    UnsupportedScheme(String),

    /// A port outside `1..=65535` was given.
    #[error("invalid port {0}: expected a value in 1..=65535")]
    InvalidPort(u32),

    /// A component was given a character that would change the structure
    /// of the URL, such as `?` in a path.
    #[error("{0} must not contain '{1}'")]
    IllegalCharacter(Context, char),
}
