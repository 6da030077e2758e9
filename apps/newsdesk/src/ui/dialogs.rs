use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
    sync::{Mutex, PoisonError},
};

pub trait Dialogs: Send + Sync {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

/// Keeps every dialog shown; confirmations are answered from a script and
/// default to "cancel" once it runs out.
#[derive(Default)]
pub struct RecordingDialogs {
    alerts: Mutex<Vec<String>>,
    confirmations: Mutex<Vec<String>>,
    answers: Mutex<VecDeque<bool>>,
}

impl RecordingDialogs {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Dialogs for RecordingDialogs {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirmations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
        self.answers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or(false)
    }
}

/// Alerts go to stderr; confirmations read a `y`/`n` line from stdin unless
/// `assume_yes` is set.
pub struct TerminalDialogs {
    assume_yes: bool,
}

impl TerminalDialogs {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Dialogs for TerminalDialogs {
    fn alert(&self, message: &str) {
        eprintln!("[alert] {message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            eprintln!("[confirm] {message} [y/N] y");
            return true;
        }
        eprint!("[confirm] {message} [y/N] ");
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
