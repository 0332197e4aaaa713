//! Display labels for grouping keys

pub const NO_PROJECT: &str = "No project";
pub const NO_LANGUAGE: &str = "No language";
pub const NO_BRANCH: &str = "No branch";
pub const NO_FILE: &str = "No file";

/// Trimmed value, or `fallback` when absent or blank
pub fn safe_label(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

/// Reduce a path to `parent/file`, or just the file name at top level
pub fn folder_and_file(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let parts: Vec<&str> = normalized.split('/').filter(|p| !p.is_empty()).collect();

    match parts.as_slice() {
        [] => NO_FILE.to_string(),
        [only] => only.to_string(),
        [.., parent, file] => format!("{parent}/{file}"),
    }
}

/// Shorten `value` to `max_len` characters with a middle ellipsis
pub fn truncate_middle(value: &str, max_len: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_len {
        return value.to_string();
    }
    if max_len <= 3 {
        return ".".repeat(max_len);
    }

    let left = (max_len - 3) / 2;
    let right = max_len - 3 - left;
    let prefix: String = chars[..left].iter().collect();
    let suffix: String = chars[chars.len() - right..].iter().collect();
    format!("{prefix}...{suffix}")
}
