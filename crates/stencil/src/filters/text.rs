//! Core string filters.

use super::FilterError;

/// Wrap in double quotes unconditionally.
pub fn quote(s: String) -> String {
    format!("\"{s}\"")
}

/// Wrap in double quotes unless the value is already quoted.
pub fn path_quote(s: String) -> String {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s
    } else {
        quote(s)
    }
}

/// Literal suffix concatenation (`append`, `pathappend`).
pub fn append(s: &str, suffix: &str) -> String {
    format!("{s}{suffix}")
}

/// Literal prefix concatenation.
pub fn prepend(s: &str, prefix: &str) -> String {
    format!("{prefix}{s}")
}

/// Literal (non-pattern) replace-all.
pub fn replace(s: &str, old: &str, new: &str) -> Result<String, FilterError> {
    if old.is_empty() {
        return Err(FilterError::InvalidArgument {
            message: "replace: the search string must not be empty".to_string(),
        });
    }
    Ok(s.replace(old, new))
}

/// Substitute the fallback only when the value is empty or whitespace-only.
pub fn default_if_blank(s: String, fallback: &str) -> String {
    if s.trim().is_empty() {
        fallback.to_string()
    } else {
        s
    }
}

/// Escape `"` as `\"` for registry-script value strings.
pub fn reg_quote(s: &str) -> String {
    s.replace('"', "\\\"")
}

/// Escape `\` as `\\`, then `"` as `\"`, for path-safe registry strings.
pub fn reg_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Append a quoted command-line argument with a leading space.
pub fn add_arg(s: &str, arg: &str) -> String {
    format!("{s} \"{arg}\"")
}
