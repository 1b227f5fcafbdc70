use std::sync::LazyLock;

use regex::Regex;

static MENU_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*menuentry '([^']+)'").expect("menu entry pattern is valid")
});

/// Titles of the `menuentry '<title>'` lines in a `grub.cfg`, in file order.
/// Entries nested in submenus are included.
pub fn menu_entries(grub_cfg: &str) -> Vec<String> {
    MENU_ENTRY
        .captures_iter(grub_cfg)
        .map(|caps| caps[1].to_owned())
        .collect()
}

/// First entry whose title contains `name` as a substring. `None` means no
/// entry matched.
pub fn locate_default_entry<'a, S: AsRef<str>>(entries: &'a [S], name: &str) -> Option<&'a str> {
    entries
        .iter()
        .map(|entry| entry.as_ref())
        .find(|entry| entry.contains(name))
}
