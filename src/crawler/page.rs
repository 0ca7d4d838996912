//! Page and token types shared by the fetcher and the scheduler

use std::fmt;

/// Position in a paginated listing
///
/// `First` requests the first page. Every later page is addressed by the
/// opaque continuation value the server handed out; tokens are only ever
/// compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// The first page of the listing (no continuation parameter)
    First,

    /// A server-issued continuation token
    Continuation(String),
}

impl Token {
    /// Builds a token from an optional server value
    ///
    /// An absent or empty value means there is no continuation.
    pub fn from_server(value: Option<String>) -> Option<Self> {
        match value {
            Some(v) if !v.is_empty() => Some(Self::Continuation(v)),
            _ => None,
        }
    }

    /// Returns the continuation value, or `None` for the first page
    pub fn continuation(&self) -> Option<&str> {
        match self {
            Self::First => None,
            Self::Continuation(v) => Some(v.as_str()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "first page"),
            Self::Continuation(v) => write!(f, "token {}", v),
        }
    }
}

/// One decoded page of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Item keys, in server order
    pub keys: Vec<String>,

    /// Token of the following page, if the listing continues
    pub next_token: Option<Token>,

    /// Whether the server reported more results after this page
    pub truncated: bool,
}

impl Page {
    /// Creates a page, dropping the next token when the page is not truncated
    ///
    /// A non-truncated page never continues, whatever token the server sent.
    pub fn new(keys: Vec<String>, next_token: Option<Token>, truncated: bool) -> Self {
        let next_token = if truncated { next_token } else { None };
        Self {
            keys,
            next_token,
            truncated,
        }
    }

    /// Creates the last page of a listing
    pub fn last(keys: Vec<String>) -> Self {
        Self::new(keys, None, false)
    }

    /// Creates a page that continues at `token`
    pub fn continued(keys: Vec<String>, token: &str) -> Self {
        Self::new(keys, Some(Token::Continuation(token.to_string())), true)
    }
}
