//! The interactive generation loop.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info, warn};

use crate::backend::{Backend, SynthesisRequest};
use crate::config::SessionConfig;
use crate::engine::{OutputFile, SynthesisError, TTSEngine};
use crate::interrupt::Interrupt;
use crate::voice::VoicePreset;

use super::prompt::{PromptError, Prompter};
use super::validate::{
    InputError, default_file_name, parse_speed, parse_voice, preview, resolve_output_path,
    validate_text,
};

const RULE_WIDTH: usize = 60;

/// A value the session asks the user for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Text,
    Voice,
    Speed,
    Filename,
}

/// Fields accepted so far for the next request.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Draft {
    pub text: Option<String>,
    pub voice: Option<VoicePreset>,
    pub speed: Option<f64>,
}

/// Where the session is between two user-visible steps.
#[derive(Debug)]
pub enum SessionState {
    /// Waiting for the user to answer the prompt for `field`.
    AwaitingInput { field: Field, draft: Draft },
    /// Checking an answer; a rejected answer re-asks the same field.
    Validating {
        field: Field,
        answer: String,
        draft: Draft,
    },
    /// Waiting for the engine.
    Synthesizing {
        request: SynthesisRequest,
        path: PathBuf,
    },
    /// Writing the engine's audio to disk.
    Persisting { audio: Vec<u8>, path: PathBuf },
    /// Telling the user how the generation went, then asking to continue.
    ReportingResult(Result<OutputFile, SynthesisError>),
    Terminated,
}

/// Counters reported when the session ends.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Generations started, including failed ones.
    pub sessions: usize,
    /// Audio files written.
    pub files_saved: usize,
}

/// Drives prompts, engine calls and file writes for one interactive session.
pub struct SessionController<B: Backend + 'static, P: Prompter, W: Write> {
    config: SessionConfig,
    engine: TTSEngine<B>,
    prompter: P,
    out: W,
    interrupt: Interrupt,
    summary: SessionSummary,
}

impl<B: Backend + 'static, P: Prompter, W: Write> SessionController<B, P, W> {
    pub fn new(
        config: SessionConfig,
        engine: TTSEngine<B>,
        prompter: P,
        out: W,
        interrupt: Interrupt,
    ) -> Self {
        Self {
            config,
            engine,
            prompter,
            out,
            interrupt,
            summary: SessionSummary::default(),
        }
    }

    /// Counters so far.
    pub fn summary(&self) -> &SessionSummary {
        &self.summary
    }

    /// Give back the prompter and output sink.
    pub fn into_parts(self) -> (P, W) {
        (self.prompter, self.out)
    }

    /// Run generations until the user stops or interrupts.
    pub fn run_loop(&mut self) -> SessionSummary {
        let mut state = self.begin_generation();
        while !matches!(state, SessionState::Terminated) {
            state = self.step(state);
        }

        let output_dir = std::path::absolute(&self.config.output_dir)
            .unwrap_or_else(|_| self.config.output_dir.clone());
        self.say("");
        self.say(format!(
            "Done! Generated {} audio file(s) in {} session(s).",
            self.summary.files_saved, self.summary.sessions
        ));
        self.say(format!("Audio files saved in: {}", output_dir.display()));
        info!(
            sessions = self.summary.sessions,
            files_saved = self.summary.files_saved,
            "Session ended"
        );

        self.summary.clone()
    }

    /// Advance the state machine by one transition.
    pub fn step(&mut self, state: SessionState) -> SessionState {
        match state {
            SessionState::AwaitingInput { field, draft } => match self.read_answer(field) {
                Ok(answer) => SessionState::Validating {
                    field,
                    answer,
                    draft,
                },
                Err(e) => self.stop(&e),
            },
            SessionState::Validating {
                field,
                answer,
                draft,
            } => self.validate(field, &answer, draft),
            SessionState::Synthesizing { request, path } => {
                self.say("");
                self.say("Generating speech...");
                match self.engine.synthesize(&request, &self.interrupt) {
                    Ok(audio) => SessionState::Persisting { audio, path },
                    Err(e) if e.is_interrupt() => self.stop(&e),
                    Err(e) => SessionState::ReportingResult(Err(e)),
                }
            }
            SessionState::Persisting { audio, path } => {
                SessionState::ReportingResult(self.engine.save(&audio, &path))
            }
            SessionState::ReportingResult(result) => {
                self.report(result);
                match self.prompt_for_continue() {
                    Ok(true) => self.begin_generation(),
                    Ok(false) => SessionState::Terminated,
                    Err(e) => self.stop(&e),
                }
            }
            SessionState::Terminated => SessionState::Terminated,
        }
    }

    /// Ask for the text to speak, one or more lines ended by an empty line.
    pub fn prompt_for_text(&mut self) -> Result<String, PromptError> {
        self.introduce(Field::Text);
        loop {
            let answer = self.read_answer(Field::Text)?;
            if let Some(text) = self.check_text(&answer) {
                return Ok(text);
            }
        }
    }

    /// Show the voice catalog and ask for an index or identifier.
    pub fn prompt_for_voice(&mut self) -> Result<VoicePreset, PromptError> {
        self.introduce(Field::Voice);
        loop {
            let answer = self.read_answer(Field::Voice)?;
            if let Some(voice) = self.check_voice(&answer) {
                return Ok(voice);
            }
        }
    }

    /// Ask for a speed multiplier.
    pub fn prompt_for_speed(&mut self) -> Result<f64, PromptError> {
        self.introduce(Field::Speed);
        loop {
            let answer = self.read_answer(Field::Speed)?;
            if let Some(speed) = self.check_speed(&answer) {
                return Ok(speed);
            }
        }
    }

    /// Ask for a file name, offering `<default_stem>_<timestamp>` as default.
    ///
    /// An existing file is only replaced after the user confirms.
    pub fn prompt_for_filename(&mut self, default_stem: &str) -> Result<PathBuf, PromptError> {
        self.introduce(Field::Filename);
        loop {
            let answer = self.read_filename(default_stem)?;
            if let Some(path) = self.check_filename(&answer, default_stem)? {
                return Ok(path);
            }
        }
    }

    /// Ask whether to run another generation. Only `n`/`no` stops.
    pub fn prompt_for_continue(&mut self) -> Result<bool, PromptError> {
        self.say("");
        self.say("=".repeat(RULE_WIDTH));
        let answer = self.ask("Generate another audio file? (Y/n): ")?;
        Ok(!matches!(answer.trim().to_lowercase().as_str(), "n" | "no"))
    }

    /// Synthesize `request` and write the audio to `path`.
    pub fn synthesize_and_save(
        &self,
        request: &SynthesisRequest,
        path: &Path,
    ) -> Result<OutputFile, SynthesisError> {
        self.engine
            .synthesize_and_save(request, path, &self.interrupt)
    }

    fn begin_generation(&mut self) -> SessionState {
        self.summary.sessions += 1;
        let banner = format!(" Session {} ", self.summary.sessions);
        self.say("");
        self.say(format!("{banner:=^width$}", width = RULE_WIDTH));
        self.enter(Field::Text, Draft::default())
    }

    fn enter(&mut self, field: Field, draft: Draft) -> SessionState {
        self.introduce(field);
        SessionState::AwaitingInput { field, draft }
    }

    /// Check one answer and move to the next field, or back to the same one.
    fn validate(&mut self, field: Field, answer: &str, mut draft: Draft) -> SessionState {
        match field {
            Field::Text => match self.check_text(answer) {
                Some(text) => {
                    self.say("");
                    self.say(format!("Text: {}", preview(&text, 100)));
                    draft.text = Some(text);
                    self.enter(Field::Voice, draft)
                }
                None => SessionState::AwaitingInput { field, draft },
            },
            Field::Voice => match self.check_voice(answer) {
                Some(voice) => {
                    draft.voice = Some(voice);
                    self.enter(Field::Speed, draft)
                }
                None => SessionState::AwaitingInput { field, draft },
            },
            Field::Speed => match self.check_speed(answer) {
                Some(speed) => {
                    draft.speed = Some(speed);
                    self.enter(Field::Filename, draft)
                }
                None => SessionState::AwaitingInput { field, draft },
            },
            Field::Filename => {
                let stem = self.config.file_stem.clone();
                match self.check_filename(answer, &stem) {
                    Ok(Some(path)) => self.finish_request(draft, path),
                    Ok(None) => SessionState::AwaitingInput { field, draft },
                    Err(e) => self.stop(&e),
                }
            }
        }
    }

    fn finish_request(&mut self, draft: Draft, path: PathBuf) -> SessionState {
        let (Some(text), Some(voice), Some(speed)) = (draft.text, draft.voice, draft.speed) else {
            warn!("Request incomplete when the file name was accepted");
            return self.enter(Field::Text, Draft::default());
        };

        self.say("");
        self.say(format!("  Text: {}", preview(&text, 50)));
        self.say(format!("  Voice: {voice}"));
        self.say(format!("  Speed: {speed:.1}x"));
        self.say(format!("  Output: {}", path.display()));

        SessionState::Synthesizing {
            request: SynthesisRequest::new(text, voice, speed),
            path,
        }
    }

    /// Print what the prompt for `field` is about.
    fn introduce(&mut self, field: Field) {
        match field {
            Field::Text => {
                self.say("Text Input:");
                self.say("Enter the text you want to convert to speech.");
                self.say("(Press Enter on an empty line when done, Ctrl+C to exit)");
            }
            Field::Voice => {
                self.say("");
                self.display_voices();
            }
            Field::Speed => {
                self.say("");
                self.say("Speed Setting:");
            }
            Field::Filename => {
                self.say("");
                self.say("Output File:");
            }
        }
    }

    fn read_answer(&mut self, field: Field) -> Result<String, PromptError> {
        match field {
            Field::Text => self.read_text_block(),
            Field::Voice => self.ask("Choose voice (1-8 or name, Enter for default): "),
            Field::Speed => {
                let prompt = format!(
                    "Speech speed ({:.1}-{:.1}, Enter for {:.1}): ",
                    self.config.speed_range.start(),
                    self.config.speed_range.end(),
                    self.config.default_speed
                );
                self.ask(&prompt)
            }
            Field::Filename => {
                let stem = self.config.file_stem.clone();
                self.read_filename(&stem)
            }
        }
    }

    /// Lines up to the first empty one, joined with newlines.
    fn read_text_block(&mut self) -> Result<String, PromptError> {
        let mut lines: Vec<String> = Vec::new();
        loop {
            let prompt = if lines.is_empty() { "> " } else { "  " };
            let line = self.ask(prompt)?;
            if line.trim().is_empty() {
                return Ok(lines.join("\n"));
            }
            lines.push(line);
        }
    }

    fn read_filename(&mut self, stem: &str) -> Result<String, PromptError> {
        let default = self
            .config
            .output_dir
            .join(default_file_name(stem, &self.config.extension, &Local::now()));
        self.say(format!("Default: {}", default.display()));
        self.ask("Custom filename (Enter for default): ")
    }

    fn check_text(&mut self, answer: &str) -> Option<String> {
        validate_text(answer).map_err(|e| self.reject(&e)).ok()
    }

    fn check_voice(&mut self, answer: &str) -> Option<VoicePreset> {
        let voice = parse_voice(answer, &self.config)
            .map_err(|e| self.reject(&e))
            .ok()?;
        self.say(format!("Selected: {voice}"));
        Some(voice)
    }

    fn check_speed(&mut self, answer: &str) -> Option<f64> {
        parse_speed(answer, &self.config)
            .map_err(|e| self.reject(&e))
            .ok()
    }

    /// Resolve the answer to a path, confirming before an overwrite.
    fn check_filename(&mut self, answer: &str, stem: &str) -> Result<Option<PathBuf>, PromptError> {
        let path = match resolve_output_path(answer, stem, &self.config, &Local::now()) {
            Ok(path) => path,
            Err(e) => {
                self.reject(&e);
                return Ok(None);
            }
        };

        if !path.exists() {
            return Ok(Some(path));
        }

        let overwrite = self.ask(&format!(
            "File {} exists. Overwrite? (y/N): ",
            path.display()
        ))?;
        if matches!(overwrite.trim().to_lowercase().as_str(), "y" | "yes") {
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }

    fn display_voices(&mut self) {
        self.say("Available Voices:");
        self.say("-".repeat(40));
        for voice in VoicePreset::ALL {
            let marker = if voice == self.config.default_voice {
                " (default)"
            } else {
                ""
            };
            self.say(format!(
                "{:2}. {:<15} - {}{marker}",
                voice.index(),
                voice.id(),
                voice.description()
            ));
        }
        self.say("-".repeat(40));
    }

    fn report(&mut self, result: Result<OutputFile, SynthesisError>) {
        let session = self.summary.sessions;
        match result {
            Ok(output) => {
                self.summary.files_saved += 1;
                self.say("Audio generated successfully!");
                self.say(format!("  File: {}", output.path.display()));
                self.say(format!("  Size: {} bytes", output.size_bytes));
                if let Some(stats) = output.audio {
                    self.say(format!(
                        "  Duration: {:.2}s ({} Hz)",
                        stats.duration_secs, stats.sample_rate
                    ));
                }
                self.say("");
                self.say(format!("Session {session} completed!"));
            }
            Err(e) => {
                warn!("Generation {session} failed: {e}");
                self.say(format!("Error: {e}"));
                self.say("");
                self.say(format!("Session {session} failed."));
            }
        }
    }

    /// Read an answer unless Ctrl-C arrived while no prompt was active.
    fn ask(&mut self, prompt: &str) -> Result<String, PromptError> {
        if self.interrupt.is_triggered() {
            return Err(PromptError::Interrupted);
        }
        self.prompter.read_line(prompt)
    }

    fn reject(&mut self, error: &InputError) {
        debug!("Rejected input: {error:?}");
        self.say(format!("Error: {error}"));
    }

    fn stop(&mut self, reason: &dyn std::error::Error) -> SessionState {
        info!("Stopping session: {reason}");
        self.say("");
        self.say("Goodbye!");
        SessionState::Terminated
    }

    fn say(&mut self, line: impl AsRef<str>) {
        if let Err(e) = writeln!(self.out, "{}", line.as_ref()) {
            debug!("Failed to write to terminal: {e}");
        }
    }
}
