use crate::config::AgendaConfig;
use crate::model::Appointment;
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod init;
pub mod list;
pub mod update;

/// Filesystem locations the non-store commands work with.
#[derive(Debug, Clone)]
pub struct AgendaPaths {
    pub home: PathBuf,
}

impl AgendaPaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured outcome of a command, for the UI to render.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_appointments: Vec<Appointment>,
    pub listed_appointments: Vec<Appointment>,
    pub config: Option<AgendaConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.affected_appointments = appointments;
        self
    }

    pub fn with_listed_appointments(mut self, appointments: Vec<Appointment>) -> Self {
        self.listed_appointments = appointments;
        self
    }

    pub fn with_config(mut self, config: AgendaConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
