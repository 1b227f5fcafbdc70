// End-to-end: a state file applied against real files in a temp directory.

use std::fs;

use grub_state::config::StateFile;
use grub_state::host::fs::FsHost;
use grub_state::state;

const GRUB_CFG: &str = "\
menuentry 'openSUSE Tumbleweed' --class opensuse {
\tlinux /boot/vmlinuz
}
submenu 'Advanced options for openSUSE Tumbleweed' {
\tmenuentry 'openSUSE Tumbleweed, with Linux 6.9 (recovery mode)' {
\t\tlinux /boot/vmlinuz-6.9
\t}
}
";

const DEFAULTS: &str = "\
GRUB_TIMEOUT=8
GRUB_CMDLINE_LINUX_DEFAULT=\"splash=silent mitigations=auto quiet\"
";

#[test]
fn applies_state_file_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let defaults = dir.path().join("grub");
    let grub_cfg = dir.path().join("grub.cfg");
    fs::write(&defaults, DEFAULTS).unwrap();
    fs::write(&grub_cfg, GRUB_CFG).unwrap();

    let state_path = dir.path().join("state.toml");
    fs::write(
        &state_path,
        format!(
            r#"
[paths]
defaults = "{}"
grub_cfg = "{}"

[default_entry]
name = "recovery"

[[kernel_params]]
name = "splash"

[[kernel_params]]
name = "mitigations"
value = "off"

[[kernel_params]]
name = "console"
value = "ttyS0,115200"
"#,
            defaults.display(),
            grub_cfg.display()
        ),
    )
    .unwrap();

    let state_file = StateFile::load(&state_path).unwrap();
    let reports = state::apply(&state_file, &FsHost, &FsHost).unwrap();
    assert_eq!(reports.len(), 4);
    assert!(reports.iter().all(|r| r.result && r.has_changes()));

    assert_eq!(
        fs::read_to_string(&defaults).unwrap(),
        "GRUB_TIMEOUT=8\n\
         GRUB_CMDLINE_LINUX_DEFAULT=\"mitigations=off quiet console=ttyS0,115200\"\n\
         GRUB_DEFAULT=\"openSUSE Tumbleweed, with Linux 6.9 (recovery mode)\"\n"
    );

    let reports = state::apply(&state_file, &FsHost, &FsHost).unwrap();
    assert!(reports.iter().all(|r| r.result && !r.has_changes()));
}

#[test]
fn unmatched_default_entry_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let defaults = dir.path().join("grub");
    fs::write(&defaults, DEFAULTS).unwrap();

    let state_file: StateFile = format!(
        "[paths]\ndefaults = \"{}\"\ngrub_cfg = \"{}\"\n\n[default_entry]\nname = \"Windows\"\n",
        defaults.display(),
        dir.path().join("missing.cfg").display()
    )
    .parse()
    .unwrap();

    let reports = state::apply(&state_file, &FsHost, &FsHost).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(!reports[0].result);
    assert_eq!(fs::read_to_string(&defaults).unwrap(), DEFAULTS);
}
