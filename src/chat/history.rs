//! Conversation history types.
//!
//! The history is an append-only, chronologically ordered sequence of
//! messages owned by the session layer. The full history — including the
//! just-appended user message — is serialized into both prompt stages on
//! every turn; no windowing or truncation is applied anywhere.

/// A single message in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    /// A message typed by the user.
    Human(String),
    /// A message produced by the assistant.
    Ai(String),
}

impl ChatMessage {
    /// Returns the text content of the message.
    pub fn content(&self) -> &str {
        match self {
            Self::Human(text) | Self::Ai(text) => text,
        }
    }

    /// Returns the speaker label used in prompt serialization.
    pub fn speaker(&self) -> &'static str {
        match self {
            Self::Human(_) => "Human",
            Self::Ai(_) => "AI",
        }
    }
}

/// An append-only conversation history.
///
/// Insertion order is chronological order. Messages are never mutated or
/// removed for the lifetime of a session; unbounded growth is a known,
/// accepted property.
#[derive(Debug, Clone, Default)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    /// Creates a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Appends a user message.
    pub fn push_human(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::Human(content.into()));
    }

    /// Appends an assistant message.
    pub fn push_ai(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::Ai(content.into()));
    }

    /// Returns all messages in chronological order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if the history has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Serializes the history for embedding in a prompt.
    ///
    /// One line per message: `Human: …` or `AI: …`.
    pub fn format_for_prompt(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}: {}", m.speaker(), m.content()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut history = ChatHistory::new();
        assert!(history.is_empty());

        history.push_ai("Hello! I'm a SQL assistant. Ask me anything about your database.");
        history.push_human("Tell me about my account holdings");
        history.push_ai("You hold two accounts.");

        assert_eq!(history.len(), 3);
        assert!(matches!(history.messages()[0], ChatMessage::Ai(_)));
        assert!(matches!(history.messages()[1], ChatMessage::Human(_)));
        assert!(matches!(history.messages()[2], ChatMessage::Ai(_)));
    }

    #[test]
    fn test_no_truncation() {
        let mut history = ChatHistory::new();
        for i in 0..200 {
            history.push_human(format!("Question {}", i));
            history.push_ai(format!("Answer {}", i));
        }

        // Every message stays; there is no windowing.
        assert_eq!(history.len(), 400);
        assert_eq!(history.messages()[0].content(), "Question 0");
    }

    #[test]
    fn test_message_accessors() {
        let human = ChatMessage::Human("hi".to_string());
        assert_eq!(human.content(), "hi");
        assert_eq!(human.speaker(), "Human");

        let ai = ChatMessage::Ai("hello".to_string());
        assert_eq!(ai.content(), "hello");
        assert_eq!(ai.speaker(), "AI");
    }

    #[test]
    fn test_format_for_prompt() {
        let mut history = ChatHistory::new();
        history.push_ai("Hello!");
        history.push_human("Show my portfolio performance");

        assert_eq!(
            history.format_for_prompt(),
            "AI: Hello!\nHuman: Show my portfolio performance"
        );
    }

    #[test]
    fn test_format_for_prompt_empty() {
        assert_eq!(ChatHistory::new().format_for_prompt(), "");
    }
}
