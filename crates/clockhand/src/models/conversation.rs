use super::message::Message;

/// An append-only transcript of messages
///
/// A conversation is owned by a single driver call. Messages can be added but never
/// edited or removed, and role ordering is left to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Start a conversation from a system instruction and a user question
    pub fn new<S: AsRef<str>, U: AsRef<str>>(system: S, user: U) -> Self {
        Self {
            messages: vec![
                Message::system().with_text(system),
                Message::user().with_text(user),
            ],
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Extend<Message> for Conversation {
    fn extend<T: IntoIterator<Item = Message>>(&mut self, iter: T) {
        self.messages.extend(iter);
    }
}
