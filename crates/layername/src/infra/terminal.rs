//! Interactive path prompts on the terminal.

use std::path::PathBuf;

use anyhow::{Context, Result};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

use crate::app::prompt::PathPrompt;

/// Reads a path from the terminal. An empty line, Ctrl-C, or Ctrl-D counts as declining.
pub struct TerminalPrompt {
    editor: Reedline,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            editor: Reedline::create(),
        }
    }

    fn ask(&mut self, title: &str, default_name: Option<&str>) -> Result<Option<PathBuf>> {
        eprintln!("{title}");
        let hint = match default_name {
            Some(name) => DefaultPromptSegment::Basic(format!("'.' for {name}")),
            None => DefaultPromptSegment::Empty,
        };
        let prompt = DefaultPrompt::new(DefaultPromptSegment::Basic("path".into()), hint);
        let signal = self
            .editor
            .read_line(&prompt)
            .context("failed to read path from terminal")?;

        match signal {
            Signal::Success(line) => Ok(interpret_answer(&line, default_name)),
            _ => Ok(None),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PathPrompt for TerminalPrompt {
    fn save_path(&mut self, title: &str, default_name: &str) -> Result<Option<PathBuf>> {
        self.ask(title, Some(default_name))
    }

    fn open_path(&mut self, title: &str) -> Result<Option<PathBuf>> {
        self.ask(title, None)
    }
}

/// `.` accepts the suggested file name; anything blank declines.
fn interpret_answer(line: &str, default_name: Option<&str>) -> Option<PathBuf> {
    match line.trim() {
        "" => None,
        "." => default_name.map(PathBuf::from),
        answer => Some(PathBuf::from(answer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_answer_declines() {
        assert_eq!(interpret_answer("   ", Some("names.txt")), None);
    }

    #[test]
    fn dot_accepts_default_name() {
        assert_eq!(
            interpret_answer(".", Some("names.txt")),
            Some(PathBuf::from("names.txt"))
        );
        assert_eq!(interpret_answer(".", None), None);
    }

    #[test]
    fn answer_is_trimmed() {
        assert_eq!(
            interpret_answer("  out/list.txt \n", None),
            Some(PathBuf::from("out/list.txt"))
        );
    }
}
