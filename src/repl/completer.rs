//! Tab completion for the line editor.

use super::session::Session;
use parking_lot::Mutex;
use reedline::{Completer, Span, Suggestion};
use std::sync::Arc;

/// Adapter from the editor's completion callback to [`Session::complete_input`].
pub struct ShellCompleter {
    session: Arc<Mutex<Session>>,
}

impl ShellCompleter {
    pub fn new(session: Arc<Mutex<Session>>) -> Self {
        Self { session }
    }
}

impl Completer for ShellCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let (start, candidates) = self.session.lock().complete_input(line, pos);
        let span = Span::new(start, pos.max(start));
        candidates
            .into_iter()
            .map(|candidate| Suggestion {
                value: candidate.text,
                description: candidate.description,
                span,
                append_whitespace: true,
                ..Default::default()
            })
            .collect()
    }
}
