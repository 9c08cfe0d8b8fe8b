use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
    Confirm,
}

impl NoticeKind {
    pub fn default_title(&self) -> &'static str {
        match self {
            NoticeKind::Info => "Notice",
            NoticeKind::Success => "Success",
            NoticeKind::Error => "Error",
            NoticeKind::Confirm => "Confirm",
        }
    }
}

/// One message for the user.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.default_title().to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Sink for user-visible messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);

    fn error(&self, message: &str) {
        self.notify(Notice::error(message));
    }
}
