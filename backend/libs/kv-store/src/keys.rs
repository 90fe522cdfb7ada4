//! Storage key schema
//!
//! Every persisted value lives under one of these keys. The string forms are
//! shared with data written by earlier versions of the app and must not change.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// The whole post collection, most recent first
    Posts,
    /// The session pointer (absent when logged out)
    CurrentUser,
    /// Every registered user
    Users,
}

impl StoreKey {
    pub const ALL: [StoreKey; 3] = [StoreKey::Posts, StoreKey::CurrentUser, StoreKey::Users];

    pub const fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Posts => "posts",
            StoreKey::CurrentUser => "currentUser",
            StoreKey::Users => "users",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_strings() {
        assert_eq!(StoreKey::Posts.as_str(), "posts");
        assert_eq!(StoreKey::CurrentUser.as_str(), "currentUser");
        assert_eq!(StoreKey::Users.to_string(), "users");
    }

    #[test]
    fn test_parse() {
        assert_eq!(StoreKey::parse("currentUser"), Some(StoreKey::CurrentUser));
        assert_eq!(StoreKey::parse("theme"), None);
    }
}
