use async_trait::async_trait;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error};

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Failure,
}

/// A message shown to the user after an operation finishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Failure,
            message: message.into(),
        }
    }
}

/// User interaction seam used by the controllers: yes/no questions and notices
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Ask a yes/no question; `false` means the user declined
    async fn confirm(&self, question: &str) -> bool;

    /// Show a notice to the user
    fn notify(&self, notice: Notice);
}

/// Prompt backed by the terminal
#[derive(Debug, Default)]
pub struct TerminalPrompt {
    assume_yes: AtomicBool,
}

impl TerminalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes: AtomicBool::new(assume_yes),
        }
    }

    /// Answer every question with yes until switched back (`--yes`)
    pub fn set_assume_yes(&self, assume_yes: bool) {
        self.assume_yes.store(assume_yes, Ordering::SeqCst);
    }
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn confirm(&self, question: &str) -> bool {
        if self.assume_yes.load(Ordering::SeqCst) {
            debug!("Auto-confirming: {}", question);
            return true;
        }

        let question = question.to_string();
        // dialoguer blocks on stdin
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(question)
                .default(false)
                .interact()
        })
        .await;

        match answer {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                error!("Failed to read confirmation: {}", e);
                false
            }
            Err(e) => {
                error!("Confirmation task failed: {}", e);
                false
            }
        }
    }

    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => println!("{}", notice.message),
            NoticeLevel::Success => println!("{}", notice.message.green()),
            NoticeLevel::Failure => eprintln!("{}", notice.message.red().bold()),
        }
    }
}
