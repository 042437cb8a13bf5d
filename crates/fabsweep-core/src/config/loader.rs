//! Environment variable loading helpers.
//!
//! Fallback chains and `.env` handling live here so business code never
//! repeats `or_else` ladders or touches `std::env::set_var` directly.

use std::env;

/// Load `.env` from the current directory into the process environment.
/// Existing variables are never overridden. Runs at most once per process.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let path = env::current_dir()
            .map(|d| d.join(".env"))
            .unwrap_or_else(|_| std::path::PathBuf::from(".env"));
        if let Ok(content) = std::fs::read_to_string(&path) {
            apply_env_content(&content);
            tracing::debug!(path = %path.display(), "loaded .env");
        }
    });
}

/// Apply `KEY=value` lines to the process environment without overriding
/// variables that are already set. Blank lines and `#` comments are skipped;
/// inline comments and surrounding quotes are stripped.
fn apply_env_content(content: &str) {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = parse_env_line(line) {
            if !key.is_empty() && env::var(key).is_err() {
                set_env_var(key, value);
            }
        }
    }
}

/// Split a `KEY=value` line, stripping inline comments (a `#` outside quotes)
/// and one layer of surrounding quotes from the value.
fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let mut value = line[eq_pos + 1..].trim();
    if let Some(hash_pos) = value.find('#') {
        let before_hash = value[..hash_pos].trim_end();
        if !before_hash.contains('"') && !before_hash.contains('\'') {
            value = before_hash;
        }
    }
    if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
        || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
    {
        value = &value[1..value.len() - 1];
    }
    Some((key, value))
}

/// Read an env var from the primary key or an alias chain, with a default.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default)
}

/// Read an env var from the primary key or an alias chain. Empty values count
/// as unset.
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()))
        .and_then(|s| {
            let s = s.trim().to_string();
            if s.is_empty() {
                None
            } else {
                Some(s)
            }
        })
}

/// Parse a boolean env var: 0/false/no/off are false, anything else set is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    let v = env::var(primary)
        .ok()
        .or_else(|| aliases.iter().find_map(|a| env::var(a).ok()));
    match v.as_deref() {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

// ─── Centralized env::set_var / remove_var wrappers ──────────────────────────
//
// All writes to the process environment go through these functions; business
// code never contains `unsafe { env::set_var(...) }` itself.
//
// SAFETY contract: callers must only mutate the environment from the main
// thread before any worker threads are spawned, or while holding the guards in
// `fabsweep-env` that scope the mutation.

/// Set a single environment variable.
#[allow(unsafe_code)]
pub fn set_env_var(key: &str, value: &str) {
    unsafe { env::set_var(key, value) };
}

/// Remove a single environment variable.
#[allow(unsafe_code)]
pub fn remove_env_var(key: &str) {
    unsafe { env::remove_var(key) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_line_basic() {
        assert_eq!(parse_env_line("KEY=value"), Some(("KEY", "value")));
        assert_eq!(parse_env_line("KEY = value "), Some(("KEY", "value")));
        assert_eq!(parse_env_line("no equals sign"), None);
    }

    #[test]
    fn test_parse_env_line_quotes_and_comments() {
        assert_eq!(parse_env_line("KEY=\"quoted value\""), Some(("KEY", "quoted value")));
        assert_eq!(parse_env_line("KEY='single'"), Some(("KEY", "single")));
        assert_eq!(parse_env_line("KEY=value # trailing comment"), Some(("KEY", "value")));
        // A hash inside quotes is part of the value
        assert_eq!(parse_env_line("KEY=\"a # b\""), Some(("KEY", "a # b")));
    }

    #[test]
    fn test_apply_env_content_does_not_override() {
        set_env_var("FABSWEEP_TEST_LOADER_EXISTING", "original");
        apply_env_content(
            "# comment\n\nFABSWEEP_TEST_LOADER_EXISTING=overridden\nFABSWEEP_TEST_LOADER_FRESH=new\n",
        );
        assert_eq!(
            env::var("FABSWEEP_TEST_LOADER_EXISTING").expect("var should be set"),
            "original"
        );
        assert_eq!(
            env::var("FABSWEEP_TEST_LOADER_FRESH").expect("var should be set"),
            "new"
        );
        remove_env_var("FABSWEEP_TEST_LOADER_EXISTING");
        remove_env_var("FABSWEEP_TEST_LOADER_FRESH");
    }

    #[test]
    fn test_env_bool_values() {
        set_env_var("FABSWEEP_TEST_LOADER_BOOL", "1");
        assert!(env_bool("FABSWEEP_TEST_LOADER_BOOL", &[], false));
        set_env_var("FABSWEEP_TEST_LOADER_BOOL", "false");
        assert!(!env_bool("FABSWEEP_TEST_LOADER_BOOL", &[], true));
        set_env_var("FABSWEEP_TEST_LOADER_BOOL", "off");
        assert!(!env_bool("FABSWEEP_TEST_LOADER_BOOL", &[], true));
        remove_env_var("FABSWEEP_TEST_LOADER_BOOL");
        assert!(env_bool("FABSWEEP_TEST_LOADER_BOOL", &[], true));
        assert!(!env_bool("FABSWEEP_TEST_LOADER_BOOL", &[], false));
    }

    #[test]
    fn test_env_optional_empty_is_unset() {
        set_env_var("FABSWEEP_TEST_LOADER_OPT", "  ");
        assert_eq!(env_optional("FABSWEEP_TEST_LOADER_OPT", &[]), None);
        set_env_var("FABSWEEP_TEST_LOADER_OPT", "x");
        assert_eq!(
            env_optional("FABSWEEP_TEST_LOADER_OPT", &[]),
            Some("x".to_string())
        );
        remove_env_var("FABSWEEP_TEST_LOADER_OPT");
    }
}
