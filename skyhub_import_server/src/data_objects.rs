use serde::{Deserialize, Serialize};

/// The admin batch-import request: a store to run under (optional) and a newline-separated list of marketplace
/// reference codes, exactly as pasted into the trigger form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    #[serde(default)]
    pub store_id: Option<i64>,
    pub references: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Warning,
    Notice,
}

/// One line of the batch outcome report shown to the operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportMessage {
    pub level: MessageLevel,
    pub reference: Option<String>,
    pub text: String,
}

impl ImportMessage {
    pub fn success(reference: &str, text: impl Into<String>) -> Self {
        Self { level: MessageLevel::Success, reference: Some(reference.to_string()), text: text.into() }
    }

    pub fn warning(reference: Option<&str>, text: impl Into<String>) -> Self {
        Self { level: MessageLevel::Warning, reference: reference.map(String::from), text: text.into() }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self { level: MessageLevel::Notice, reference: None, text: text.into() }
    }
}

/// The accumulated per-reference messages for one batch. The import endpoint always answers with this report,
/// whatever happened to the individual references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub messages: Vec<ImportMessage>,
}

impl ImportReport {
    pub fn push(&mut self, message: ImportMessage) {
        self.messages.push(message);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ImportMessage> {
        self.messages.iter().filter(|m| m.level == MessageLevel::Warning)
    }
}
