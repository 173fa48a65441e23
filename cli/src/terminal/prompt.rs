//! Line-based console prompts for the mapping workflow.
//!
//! Prompts always go to the terminal, also when `--output` redirects the report.

use std::io;

use colored::*;
use console::Term;

use crate::terminal::colors;

/// Answers accepted per question before the prompter gives up on it.
pub const MAX_ATTEMPTS: usize = 3;

/// Where questions are written and answers read from.
pub trait Console {
    fn show(&self, text: &str) -> io::Result<()>;
    /// One line of input without the line ending; empty at end of input.
    fn read_answer(&self) -> io::Result<String>;
}

impl Console for Term {
    fn show(&self, text: &str) -> io::Result<()> {
        self.write_str(text)?;
        self.flush()
    }

    fn read_answer(&self) -> io::Result<String> {
        self.read_line()
    }
}

pub struct Prompter<C: Console> {
    console: C,
}

impl<C: Console> Prompter<C> {
    pub fn new(console: C) -> Self {
        Self { console }
    }

    /// Reads one answer. Empty input yields `default`, which may be `None`.
    pub fn ask(&self, question: &str, default: Option<&str>) -> io::Result<Option<String>> {
        let hint = match default {
            Some(value) => format!(" [{}]", value.color(colors::ACCENT)),
            None => String::new(),
        };
        self.console
            .show(&format!("{} {}{}: ", "?".color(colors::PRIMARY).bold(), question, hint))?;

        let answer = self.console.read_answer()?;
        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(default.map(str::to_string));
        }
        Ok(Some(answer.to_string()))
    }

    /// Asks until `validate` accepts the answer. Gives up with `None` after
    /// [`MAX_ATTEMPTS`] rejected answers.
    pub fn ask_valid<T, E, F>(
        &self,
        question: &str,
        default: Option<&str>,
        validate: F,
    ) -> io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, E>,
        E: std::fmt::Display,
    {
        for _ in 0..MAX_ATTEMPTS {
            let Some(answer) = self.ask(question, default)? else {
                self.complain("a value is required")?;
                continue;
            };
            match validate(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => self.complain(&e.to_string())?,
            }
        }
        Ok(None)
    }

    /// Yes/no question; anything but an answer starting with `y` is a no.
    pub fn confirm(&self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{question} (y/n)"), Some("n"))?;
        Ok(answer.is_some_and(|a| a.to_ascii_lowercase().starts_with('y')))
    }

    fn complain(&self, msg: &str) -> io::Result<()> {
        self.console
            .show(&format!("{} {}\n", "[-]".red().bold(), msg))
    }
}
