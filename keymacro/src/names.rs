//! Path and name splitting for current-item and listing keywords.
//!
//! Both `/` and `\` count as separators so Windows and Unix style paths
//! split the same way.

pub fn is_separator(ch: char) -> bool {
    ch == '/' || ch == '\\'
}

fn last_separator(full_name: &str) -> Option<usize> {
    full_name.rfind(['/', '\\'])
}

/// Last path component
pub fn file_name(full_name: &str) -> &str {
    match last_separator(full_name) {
        Some(idx) => &full_name[idx + 1..],
        None => full_name,
    }
}

/// Everything up to and including the last separator
pub fn dir_with_separator(full_name: &str) -> &str {
    match last_separator(full_name) {
        Some(idx) => &full_name[..=idx],
        None => "",
    }
}

/// Split a name at its last dot into name part and extension (without the
/// dot). A name starting with its only dot, like `.bashrc`, is all extension.
pub fn split_ext(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => (&name[..idx], &name[idx + 1..]),
        None => (name, ""),
    }
}

/// Drive or root part: `C:`, `\\server\share`, `/` or empty
pub fn drive(full_name: &str) -> &str {
    let bytes = full_name.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return &full_name[..2];
    }

    let mut chars = full_name.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if is_separator(a) && is_separator(b) => unc_root(full_name),
        (Some(a), _) if is_separator(a) => &full_name[..1],
        _ => "",
    }
}

/// `\\server\share` prefix of a UNC path
fn unc_root(full_name: &str) -> &str {
    let after_prefix = &full_name[2..];
    let Some(server_end) = after_prefix.find(['/', '\\']) else {
        return full_name;
    };
    let share_start = server_end + 1;
    let share_len = after_prefix[share_start..]
        .find(['/', '\\'])
        .unwrap_or(after_prefix.len() - share_start);
    &full_name[..2 + share_start + share_len]
}

/// Join a directory and a name with a single separator, reusing the style
/// the directory already uses
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        return name.to_string();
    }
    if dir.ends_with(is_separator) {
        return format!("{}{}", dir, name);
    }
    let sep = if dir.contains('\\') && !dir.contains('/') {
        '\\'
    } else {
        '/'
    };
    format!("{}{}{}", dir, sep, name)
}
