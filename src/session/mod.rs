//! The interactive session: prompts, validation and the generation loop.
//!
//! [`SessionController`] asks for text, voice, speed and a file name,
//! sends the request to the engine and saves the audio, repeating until
//! the user stops. Invalid answers are re-asked; engine and disk failures
//! are reported and the loop continues; Ctrl-C or end of input ends it.

mod controller;
mod prompt;
mod validate;

pub use controller::{Draft, Field, SessionController, SessionState, SessionSummary};
pub use prompt::{LinePrompter, PromptError, Prompter};
pub use validate::{
    InputError, default_file_name, parse_speed, parse_voice, preview, resolve_output_path,
    validate_text,
};
