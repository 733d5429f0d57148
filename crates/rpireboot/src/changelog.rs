//! Release history printed by `--changelog`.

use std::fmt::Write;

/// One released version.
pub struct Change {
    pub version: &'static str,
    pub date: &'static str,
    pub description: &'static [&'static str],
}

/// Newest first.
pub const CHANGELOG: &[Change] = &[
    Change {
        version: "0.1.0",
        date: "2026 Oct 18",
        description: &[
            "initial revision",
            "debounce window measured from the last accepted press",
            "exit with an error if the GPIO edge wait fails",
            "log refused restart requests",
            "add --dry-run and --edge-timeout",
        ],
    },
];

pub fn render() -> String {
    let mut out = String::new();
    for change in CHANGELOG {
        let _ = writeln!(
            out,
            "{} {} ({})",
            env!("CARGO_PKG_NAME"),
            change.version,
            change.date
        );
        for line in change.description {
            let _ = writeln!(out, "  - {}", line);
        }
    }
    out
}

pub fn print() {
    print!("{}", render());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_is_logged() {
        assert_eq!(CHANGELOG[0].version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_render() {
        let text = render();
        assert!(text.starts_with("rpireboot 0.1.0 (2026 Oct 18)\n"));
        assert!(text.contains("  - initial revision\n"));
    }
}
