//! Interactive loop over the line editor.

use super::completer::ShellCompleter;
use super::session::{InterruptOutcome, Outcome, Session};
use parking_lot::Mutex;
use reedline::{
    default_emacs_keybindings, ColumnarMenu, Emacs, FileBackedHistory, History, HistoryItem,
    KeyCode, KeyModifiers, MenuBuilder, Prompt, PromptEditMode, PromptHistorySearch,
    PromptHistorySearchStatus, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};
use std::borrow::Cow;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const COMPLETION_MENU: &str = "completion_menu";

/// Set to any non-empty value to force batch mode.
pub const NON_INTERACTIVE_ENV: &str = "XCSH_NON_INTERACTIVE";

/// Interactive mode needs no command words, a terminal on stdin and no
/// override in the environment.
pub fn should_enter_repl(words: &[String]) -> bool {
    interactive_mode(
        !words.is_empty(),
        std::io::stdin().is_terminal(),
        std::env::var_os(NON_INTERACTIVE_ENV).is_some_and(|v| !v.is_empty()),
    )
}

fn interactive_mode(has_words: bool, stdin_is_tty: bool, forced_batch: bool) -> bool {
    !has_words && stdin_is_tty && !forced_batch
}

/// The interactive shell.
pub struct Repl {
    session: Arc<Mutex<Session>>,
    editor: Reedline,
}

impl Repl {
    pub fn new(session: Session) -> anyhow::Result<Self> {
        let capacity = session.history().entries().len().max(1000);
        let mut history = FileBackedHistory::new(capacity)
            .map_err(|e| anyhow::anyhow!("Failed to create history: {}", e))?;
        // Up-arrow recall reaches lines from earlier sessions
        for entry in session.history().entries() {
            if let Err(e) = history.save(HistoryItem::from_command_line(entry.clone())) {
                debug!(error = %e, "Skipping history entry");
            }
        }

        let session = Arc::new(Mutex::new(session));
        let completer = Box::new(ShellCompleter::new(Arc::clone(&session)));
        let menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let editor = Reedline::create()
            .with_history(Box::new(history))
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        Ok(Self { session, editor })
    }

    /// Run until the user leaves; returns the last command's exit code.
    pub fn run(&mut self) -> anyhow::Result<i32> {
        self.session.lock().print_banner();
        info!("Interactive session started");

        loop {
            let prompt = ReplPrompt::new(self.session.lock().prompt());

            match self.editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let outcome = self.session.lock().execute_command(&line);
                    if outcome == Outcome::Exit {
                        break;
                    }
                }
                Ok(Signal::CtrlC) => {
                    let outcome = self.session.lock().handle_interrupt(Instant::now());
                    if outcome == InterruptOutcome::Terminate {
                        break;
                    }
                }
                Ok(Signal::CtrlD) => break,
                Err(e) => {
                    warn!(error = %e, "Line editor error");
                    eprintln!("Error: {}", e);
                }
            }
        }

        let mut session = self.session.lock();
        session.shutdown();
        info!("Interactive session ended");
        Ok(session.last_exit_code())
    }
}

/// Prompt with a precomputed left segment.
struct ReplPrompt {
    prompt_str: String,
}

impl ReplPrompt {
    fn new(prompt_str: String) -> Self {
        Self { prompt_str }
    }
}

#[allow(clippy::all, warnings)]
impl Prompt for ReplPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed(&self.prompt_str)
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse-search: {}) ",
            prefix, history_search.term
        ))
    }
}
