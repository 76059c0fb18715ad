//! Environment variable parsing with warn-level logging for invalid values.

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: std::str::FromStr + std::fmt::Display>(
    var: &str,
    default: T,
) -> T {
    match std::env::var(var) {
        Ok(v) => parse_or_default(var, &v, default),
        Err(_) => default,
    }
}

/// Read a string variable, falling back to `default` when unset or blank.
#[must_use]
pub fn env_string_with_default(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Read a boolean flag. Accepts `1/0`, `true/false`, `yes/no`, `on/off`.
#[must_use]
pub fn env_flag(var: &str, default: bool) -> bool {
    match std::env::var(var) {
        Ok(v) => parse_flag(var, &v, default),
        Err(_) => default,
    }
}

fn parse_or_default<T: std::str::FromStr + std::fmt::Display>(var: &str, raw: &str, default: T) -> T {
    match raw.parse() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(
                var,
                value = %raw,
                default = %default,
                "invalid env var value, using default"
            );
            default
        },
    }
}

fn parse_flag(var: &str, raw: &str, default: bool) -> bool {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(var, value = %raw, default, "invalid boolean env var, using default");
            default
        },
    }
}
