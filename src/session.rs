//! Per-visitor interface state
//!
//! The selected language, the selected field and the chat panel live in one
//! explicit value owned by the caller and passed to whatever renders them.

use crate::locations::{find_language, FieldLocation, Language, LANGUAGES};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Assistant,
    Farmer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    fn assistant(text: &str) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.to_string(),
        }
    }

    fn farmer(text: &str) -> Self {
        Self {
            speaker: Speaker::Farmer,
            text: text.to_string(),
        }
    }
}

/// Scripted opening exchange shown in a fresh panel
pub fn scripted_transcript() -> Vec<ChatMessage> {
    vec![
        ChatMessage::assistant("Hello! I'm your farm assistant. How can I help you today?"),
        ChatMessage::farmer("What crops should I grow this season?"),
        ChatMessage::assistant(
            "Based on your location and current weather, wheat, barley, and mustard would be good options. \
             Would you like more detailed information?",
        ),
    ]
}

/// Floating chat widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatPanel {
    pub open: bool,
    pub draft: String,
    pub messages: Vec<ChatMessage>,
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self {
            open: false,
            draft: String::new(),
            messages: scripted_transcript(),
        }
    }
}

impl ChatPanel {
    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Whether the send button is enabled
    pub fn can_submit(&self) -> bool {
        !self.draft.trim().is_empty()
    }

    /// Send the draft. Blank drafts are ignored and left in place.
    pub fn submit(&mut self) -> Option<ChatMessage> {
        if !self.can_submit() {
            return None;
        }
        let message = ChatMessage::farmer(self.draft.trim());
        tracing::debug!("Sending message: {}", message.text);
        self.messages.push(message.clone());
        self.draft.clear();
        Some(message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub language: Language,
    pub selected_location: Option<FieldLocation>,
    pub chat: ChatPanel,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            language: LANGUAGES[0],
            selected_location: None,
            chat: ChatPanel::default(),
        }
    }
}

impl SessionState {
    /// Switch language; unknown codes leave the current one in place
    pub fn select_language(&mut self, code: &str) -> bool {
        match find_language(code) {
            Some(language) => {
                self.language = language;
                true
            }
            None => false,
        }
    }

    pub fn select_location(&mut self, location: FieldLocation) {
        self.selected_location = Some(location);
    }

    pub fn clear_location(&mut self) {
        self.selected_location = None;
    }
}
