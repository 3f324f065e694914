use url::form_urlencoded;

/// What the gate does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Continue,
    /// Relative location, rendered as `307 Temporary Redirect`.
    RedirectTo(String),
}

impl Decision {
    /// Login redirect that remembers where the user was heading.
    ///
    /// Only the path is carried over; the original query string is dropped.
    pub fn login(login_path: &str, callback_path: &str) -> Self {
        let encoded: String = form_urlencoded::byte_serialize(callback_path.as_bytes()).collect();
        Self::RedirectTo(format!("{login_path}?callbackUrl={encoded}"))
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Continue => None,
            Self::RedirectTo(location) => Some(location),
        }
    }

    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }
}
