//! Configuration lookup helpers
//!
//! Readers in this crate take a `Fn(&str) -> Option<String>` lookup instead of
//! touching the process environment directly, so they can be driven from a
//! map in tests.

/// Read a variable from the process environment. Blank values read as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Build a lookup over fixed key/value pairs
pub fn lookup_from<'a>(
    pairs: &'a [(&'a str, &'a str)],
) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
            .filter(|v| !v.trim().is_empty())
    }
}
