//! Reading and rendering assignments in `/etc/default/grub`.

use std::sync::LazyLock;

use regex::Regex;

/// Find pattern for the kernel command-line assignment line.
pub const CMDLINE_PATTERN: &str = r#"(?m)^GRUB_CMDLINE_LINUX_DEFAULT="[^"]*""#;

static CMDLINE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^GRUB_CMDLINE_LINUX_DEFAULT="([^"]*)""#)
        .expect("command line pattern is valid")
});

/// Value of the first `GRUB_CMDLINE_LINUX_DEFAULT="..."` line, if any.
pub fn cmdline_default(text: &str) -> Option<String> {
    CMDLINE_VALUE
        .captures(text)
        .map(|caps| caps[1].to_owned())
}

pub fn cmdline_assignment(command_line: &str) -> String {
    format!(r#"GRUB_CMDLINE_LINUX_DEFAULT="{command_line}""#)
}

/// `GRUB_DEFAULT="<entry>"`. The file is sourced by the shell, so
/// characters special inside double quotes are backslash-escaped.
pub fn default_assignment(entry: &str) -> String {
    let mut escaped = String::with_capacity(entry.len());
    for c in entry.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!(r#"GRUB_DEFAULT="{escaped}""#)
}
