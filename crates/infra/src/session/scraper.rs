//! Employee identity scraping
//!
//! The time overview page embeds the logged-in user as a JavaScript object
//! literal:
//!
//! ```text
//! var currentLogin = {
//!     currentUser: '4711',
//!     ...
//! };
//! ```
//!
//! There is no API for this value. The page is scanned, not parsed.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)]
static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>(.*?)</script\s*>")
        .expect("SCRIPT_BLOCK should compile - this is a bug")
});

#[allow(clippy::expect_used)]
static CURRENT_LOGIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)var currentLogin = \{(.*)\};")
        .expect("CURRENT_LOGIN should compile - this is a bug")
});

#[allow(clippy::expect_used)]
static CURRENT_USER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"currentUser:\s+'(\d+)'").expect("CURRENT_USER should compile - this is a bug")
});

/// Source of the employee id on an authenticated page.
pub trait IdentityResolver: Send + Sync {
    /// The employee id found in `html`, if any.
    fn resolve(&self, html: &str) -> Option<String>;
}

/// Scans every `<script>` block for a `currentLogin` assignment.
///
/// Blocks without the assignment are skipped. When several blocks carry
/// one, the last wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptBlockResolver;

impl IdentityResolver for ScriptBlockResolver {
    fn resolve(&self, html: &str) -> Option<String> {
        script_blocks(html).filter_map(current_user).last()
    }
}

fn script_blocks(html: &str) -> impl Iterator<Item = &str> {
    SCRIPT_BLOCK.captures_iter(html).filter_map(|c| c.get(1)).map(|m| m.as_str())
}

fn current_user(script: &str) -> Option<String> {
    let login = CURRENT_LOGIN.captures(script)?.get(1)?.as_str();
    let user = CURRENT_USER.captures(login)?.get(1)?;
    Some(user.as_str().to_string())
}
