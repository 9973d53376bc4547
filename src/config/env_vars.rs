use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// `%VAR%`, `${VAR}` or `$VAR`
    static ref ENV_VAR: Regex =
        Regex::new(r"%([A-Za-z_][A-Za-z0-9_]*)%|\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)").unwrap();
}

/// Expand environment variables in a configured path.
///
/// Both Windows (`%VAR%`) and Unix (`$VAR`, `${VAR}`) forms are accepted on
/// every platform. Unset variables are left as written.
pub fn expand_env_vars(value: &str) -> String {
    ENV_VAR
        .replace_all(value, |caps: &Captures| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            std::env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
