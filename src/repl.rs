//! Interactive shell
//!
//! Context navigation (`root → domain → action`), builtins, the prompt and
//! banner, history, and the reedline-driven loop. [`Session`] owns all state;
//! [`Repl`] only moves lines and signals between the editor and the session.

pub mod banner;
pub mod builtins;
mod completer;
pub mod console;
pub mod context;
mod engine;
pub mod history;
pub mod input;
pub mod prompt;
pub mod session;

pub use completer::ShellCompleter;
pub use context::{ContextPath, ContextValidator};
pub use engine::{should_enter_repl, Repl, NON_INTERACTIVE_ENV};
pub use history::CommandHistory;
pub use prompt::{detect_color_support, render_prompt, PromptStyle};
pub use session::{InterruptOutcome, Outcome, Session, SessionOptions};
