//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They cover I/O and task spawning only, which keeps the reducer free of
//! side effects.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Start typing `text`, replacing any reveal in progress.
    StartReveal { text: String },

    /// Open a URL with the platform opener.
    OpenUrl { url: String },
}
