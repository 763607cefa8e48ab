//! Terminal output for `lumen`.
//!
//! Every human-readable printer is silent under `--json`; JSON goes to stdout
//! and errors always reach stderr.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};

/// Where command output goes, and in which form.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    fn human(&self) -> bool {
        !self.json
    }

    pub fn info(&self, msg: &str) {
        if self.human() {
            println!("{} {}", style("ℹ").blue(), msg);
        }
    }

    pub fn success(&self, msg: &str) {
        if self.human() {
            println!("{} {}", style("✓").green(), msg);
        }
    }

    /// Non-fatal problem, such as a catalog that failed to load.
    pub fn warn(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Fatal error. Under `--json` this is an `{"error": ...}` object.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Detail shown with `--verbose` only.
    pub fn debug(&self, msg: &str) {
        if self.verbose && self.human() {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if self.human() {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// Pretty-printed JSON on stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => self.error(&format!("Failed to encode output: {e}")),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.human() {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    pub fn list_item(&self, item: &str) {
        if self.human() {
            println!("  {} {}", style("•").dim(), item);
        }
    }

    /// One row of product columns, each cut to its width.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.human() {
            println!("  {}", table_cells(cols, widths).join("  "));
        }
    }

    /// Separator under a table header, sized to the terminal.
    pub fn rule(&self) {
        if self.human() {
            let width = (self.term.size().1 as usize).clamp(20, 100) - 2;
            println!("  {}", style("-".repeat(width)).dim());
        }
    }

    /// Spinner shown while recommendations are computed; hidden under `--json`.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Whether facet prompts can be shown.
    pub fn is_interactive(&self) -> bool {
        self.human() && self.term.is_term()
    }
}

fn table_cells(cols: &[&str], widths: &[usize]) -> Vec<String> {
    cols.iter()
        .zip(widths)
        .map(|(col, width)| {
            let cell = console::truncate_str(col, *width, "…");
            console::pad_str(&cell, *width, console::Alignment::Left, None).into_owned()
        })
        .collect()
}

/// Score badge: strong matches green, weak ones dim.
pub fn score_badge(score: f64) -> String {
    let text = format!("{:.1}", score);
    if score >= 20.0 {
        style(text).green().to_string()
    } else if score >= 10.0 {
        style(text).yellow().to_string()
    } else {
        style(text).dim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_cells_pad_and_truncate() {
        let cells = table_cells(&["p1", "Kitchen Pendant LED"], &[4, 8]);
        assert_eq!(cells[0], "p1  ");
        assert_eq!(console::measure_text_width(&cells[1]), 8);
        assert!(cells[1].ends_with('…'));
    }

    #[test]
    fn test_score_badge_keeps_one_decimal() {
        let badge = score_badge(20.04);
        assert_eq!(console::strip_ansi_codes(&badge), "20.0");
    }

    #[test]
    fn test_json_mode_hides_spinner_and_prompts() {
        let output = Output::new(false, true);
        assert!(output.is_json());
        assert!(!output.is_interactive());
        assert!(output.spinner("Finding matches").is_hidden());
    }
}
