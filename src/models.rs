//! Response model for scr.im.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A masked email address as returned by scr.im.
///
/// Built by [`Client::generate`](crate::Client::generate) once the reply has been
/// validated. The `Display` implementation prints the canonical URL, so a response
/// can be dropped straight into a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    email: String,
    alias: String,
    url: String,
    result: String,
    is_old: bool,
}

impl Response {
    pub(crate) fn new(
        email: String,
        alias: String,
        url: String,
        result: String,
        is_old: bool,
    ) -> Self {
        Self {
            email,
            alias,
            url,
            result,
            is_old,
        }
    }

    /// The email address the alias points to.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The alias actually assigned, which is service-chosen when none was requested.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Canonical URL, e.g. `http://scr.im/foobarscrim`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw status message from scr.im.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// `true` if the email already had an alias on file and no new one was created.
    pub fn is_old(&self) -> bool {
        self.is_old
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// The XML document scr.im answers with.
///
/// Missing elements read as empty strings; the root element name is not checked.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScrimXml {
    #[serde(default)]
    pub(crate) result: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) scrim: String,
    #[serde(default)]
    pub(crate) url: String,
}
