//! Questionnaire and progress output using cliclack (Charm-style inline prompts)
//!
//! Only available when the `tui` feature is enabled.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{run, CreateArgs};
