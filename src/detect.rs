// Platform sniffing helpers. Pure functions over strings read from the page
// so they can be tested on the host.

use crate::constants::SWITCH_HAPTICS_MIN_IOS;

/// iOS major/minor version from a user agent such as
/// `... CPU iPhone OS 17_4_1 like Mac OS X ...`.
pub fn ios_version(user_agent: &str) -> Option<(u32, u32)> {
    let idx = user_agent.find(" OS ")?;
    let prefix = &user_agent[..idx];
    if !(prefix.contains("iPhone") || prefix.contains("iPad") || prefix.contains("iPod")) {
        return None;
    }
    let rest = &user_agent[idx + 4..];
    let version = rest.split_whitespace().next()?;
    let mut parts = version.split('_');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);
    Some((major, minor))
}

/// Only iPhones vibrate, and only from 17.4 on.
pub fn supports_switch_haptics(user_agent: &str) -> bool {
    if !user_agent.contains("iPhone") {
        return false;
    }
    ios_version(user_agent)
        .map(|v| v >= SWITCH_HAPTICS_MIN_IOS)
        .unwrap_or(false)
}

/// Storage namespace from the `<body>` attribute, falling back to `<html>`
/// while the body is not parsed yet. Blank values are ignored.
pub fn pick_namespace(body: Option<String>, root: Option<String>) -> Option<String> {
    [body, root]
        .into_iter()
        .flatten()
        .map(|ns| ns.trim().to_string())
        .find(|ns| !ns.is_empty())
}
