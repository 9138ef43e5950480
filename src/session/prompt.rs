//! Line input from the terminal.

use std::fs;
use std::path::PathBuf;

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use thiserror::Error;
use tracing::debug;

use crate::config::app_data_dir;

/// Why a prompt produced no answer. Every variant ends the session.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Interrupted")]
    Interrupted,

    #[error("Input closed")]
    Closed,

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Source of answers to the session's questions.
pub trait Prompter {
    /// Show `prompt` and read one line, without the trailing newline.
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError>;
}

/// Interactive prompter backed by rustyline, with persistent history.
pub struct LinePrompter {
    editor: DefaultEditor,
    history: Option<PathBuf>,
}

impl LinePrompter {
    /// Create a prompter, loading history from `history` when it exists.
    pub fn new(history: Option<PathBuf>) -> Result<Self, PromptError> {
        let mut editor = DefaultEditor::new().map_err(|e| PromptError::Terminal(e.to_string()))?;

        if let Some(path) = &history
            && let Err(e) = editor.load_history(path)
        {
            debug!("No prompt history loaded from {}: {e}", path.display());
        }

        Ok(Self { editor, history })
    }

    /// Default history file location.
    pub fn default_history_path() -> PathBuf {
        app_data_dir().join("history.txt")
    }
}

impl Prompter for LinePrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty()
                    && let Err(e) = self.editor.add_history_entry(line.as_str())
                {
                    debug!("Failed to record prompt history: {e}");
                }
                Ok(line)
            }
            Err(ReadlineError::Interrupted) => Err(PromptError::Interrupted),
            Err(ReadlineError::Eof) => Err(PromptError::Closed),
            Err(e) => Err(PromptError::Terminal(e.to_string())),
        }
    }
}

impl Drop for LinePrompter {
    fn drop(&mut self) {
        let Some(path) = &self.history else {
            return;
        };

        if let Some(dir) = path.parent()
            && let Err(e) = fs::create_dir_all(dir)
        {
            debug!("Failed to create history directory {}: {e}", dir.display());
            return;
        }
        if let Err(e) = self.editor.save_history(path) {
            debug!("Failed to save prompt history to {}: {e}", path.display());
        }
    }
}

/// Prompter that replays canned answers, for tests.
#[cfg(test)]
pub(crate) struct ScriptedPrompter {
    answers: std::collections::VecDeque<Result<String, PromptError>>,
    pub prompts: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| Ok(a.to_string())).collect(),
            prompts: Vec::new(),
        }
    }

    /// Answer the next prompt after the scripted ones with Ctrl-C.
    pub fn then_interrupt(mut self) -> Self {
        self.answers.push_back(Err(PromptError::Interrupted));
        self
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().unwrap_or(Err(PromptError::Closed))
    }
}
