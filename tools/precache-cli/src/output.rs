//! Terminal and JSON output for the CLI.

use console::style;

/// Rendering mode picked from the global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Human { verbose: bool },
    Json,
}

/// Output handler shared by all commands.
///
/// In JSON mode only [`Output::json`] and errors are written.
#[derive(Debug, Clone)]
pub struct Output {
    mode: Mode,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        let mode = if json { Mode::Json } else { Mode::Human { verbose } };
        Self { mode }
    }

    pub fn is_json(&self) -> bool {
        self.mode == Mode::Json
    }

    fn is_human(&self) -> bool {
        !self.is_json()
    }

    /// Report a successful outcome.
    pub fn ok(&self, msg: &str) {
        if self.is_human() {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    /// Report something the user should look at.
    pub fn warn(&self, msg: &str) {
        if self.is_human() {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Report a failure. Always written, as `{"error": ...}` in JSON mode.
    pub fn error(&self, msg: &str) {
        match self.mode {
            Mode::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
            Mode::Human { .. } => eprintln!("{} {}", style("✗").red(), style(msg).red()),
        }
    }

    /// Detail shown only with `--verbose`.
    pub fn trace(&self, msg: &str) {
        if self.mode == (Mode::Human { verbose: true }) {
            eprintln!("  {}", style(msg).dim());
        }
    }

    /// Aligned `label: value` lines.
    pub fn fields(&self, fields: &[(&str, String)]) {
        if !self.is_human() {
            return;
        }
        let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, value) in fields {
            println!("  {:width$}  {}", style(label).dim(), value, width = width);
        }
    }

    /// A titled list of paths; nothing is printed for an empty list.
    pub fn path_list(&self, title: &str, paths: &[String]) {
        if !self.is_human() || paths.is_empty() {
            return;
        }
        println!("\n{}", style(format!("{} ({})", title, paths.len())).bold());
        for path in paths {
            println!("  {}", path);
        }
    }

    /// A bold section title.
    pub fn title(&self, title: &str) {
        if self.is_human() {
            println!("\n{}", style(title).bold());
        }
    }

    /// Pretty-printed JSON on stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }
}
