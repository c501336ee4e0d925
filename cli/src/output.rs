//! Styled terminal output.
//!
//! Stands in for the toast notifications of a graphical shell: every
//! user-facing message goes through [`Output`] rather than `println!`.

use std::fmt::Display;

use console::{Term, style};

pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        // A closed stdout is not worth failing the command over.
        drop(self.term.write_line(text));
    }

    pub fn success(&self, message: impl Display) {
        self.line(&format!("{} {}", style("✓").green().bold(), message));
    }

    pub fn error(&self, message: impl Display) {
        self.line(&format!("{} {}", style("✗").red().bold(), message));
    }

    pub fn warning(&self, message: impl Display) {
        self.line(&format!("{} {}", style("⚠").yellow().bold(), message));
    }

    pub fn info(&self, message: impl Display) {
        self.line(&format!("{} {}", style("ℹ").blue().bold(), message));
    }

    pub fn print(&self, message: impl Display) {
        self.line(&message.to_string());
    }

    pub fn newline(&self) {
        self.line("");
    }

    pub fn header(&self, message: impl Display) {
        self.line(&style(message).bold().cyan().to_string());
    }

    pub fn dim(&self, message: impl Display) {
        self.line(&style(message).dim().to_string());
    }

    pub fn labeled(&self, label: impl Display, value: impl Display) {
        self.line(&format!("  {}: {}", style(label).dim(), value));
    }

    /// Page buttons, the current one highlighted.
    pub fn page_numbers(&self, pages: &[usize], current: usize, has_prev: bool, has_next: bool) {
        let prev = if has_prev {
            style("‹ prev").to_string()
        } else {
            style("‹ prev").dim().to_string()
        };
        let next = if has_next {
            style("next ›").to_string()
        } else {
            style("next ›").dim().to_string()
        };

        let numbers: Vec<String> = pages
            .iter()
            .map(|&page| {
                if page == current {
                    style(format!("[{page}]")).cyan().bold().to_string()
                } else {
                    format!(" {page} ")
                }
            })
            .collect();

        self.line(&format!("{prev}  {}  {next}", numbers.join(" ")));
    }
}
