/// Turns an arbitrary label into a safe group name: lowercased, with
/// every character outside `[a-z0-9_]` replaced by `replacer`. Mirrors
/// how Ansible sanitizes keyed/site group names.
pub fn to_safe_group_name(name: &str, replacer: char) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                replacer
            }
        })
        .collect()
}
