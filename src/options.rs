/// Options controlling how strictly [`parse`](fn.parse.html) treats its
/// input.  Everything is off by default.
///
/// ```rust
/// use uriclean::ParseOptions;
///
/// let options = ParseOptions::new().fix(true).add_port(true);
/// assert!(options.fix && options.add_port && !options.allow_login);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde_::Serialize, serde_::Deserialize),
    serde(crate = "serde_", rename_all = "camelCase", default)
)]
pub struct ParseOptions {
    /// Repair invalid input instead of failing: encode illegal characters,
    /// IDN-encode the host, drop forbidden credentials and fall back to
    /// `localhost` for a missing host.
    pub fix: bool,

    /// Always put the scheme's default port into the result.
    pub add_port: bool,

    /// Permit `user[:pass]@` in HTTP(S) URLs.
    pub allow_login: bool,
}

impl ParseOptions {
    /// The options used by [`sanitise`](fn.sanitise.html).
    pub const FIX: Self = Self::new().fix(true);

    /// All options off.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fix: false,
            add_port: false,
            allow_login: false,
        }
    }

    /// Change the `fix` option.
    #[must_use]
    pub const fn fix(mut self, fix: bool) -> Self {
        self.fix = fix;
        self
    }

    /// Change the `add_port` option.
    #[must_use]
    pub const fn add_port(mut self, add_port: bool) -> Self {
        self.add_port = add_port;
        self
    }

    /// Change the `allow_login` option.
    #[must_use]
    pub const fn allow_login(mut self, allow_login: bool) -> Self {
        self.allow_login = allow_login;
        self
    }
}
