//! Ask-AI assistant screen

use super::{is_blank, ViewResult};
use crate::client::{ApiClient, ClientResult, PaymentQuery};
use crate::models::{ChatMessage, PaymentSummary};
use crate::session::Session;

pub const GREETING: &str = "Hello! How can I help you today?";

/// Payments sampled for the status counts in the prompt
const PROMPT_SAMPLE_SIZE: u32 = 100;

/// Wrap the user's text with current payment figures
pub fn build_prompt(summary: &PaymentSummary, user_text: &str) -> String {
    format!(
        "You are a business advisor for a pizza restaurant. Here is some data about payments:\n\
         - Total payments: {}\n\
         - Pending payments: {}\n\
         - Successful payments: {}\n\
         \n\
         User prompt: {}\n\
         \n\
         Provide advice based on the data and the user's prompt.",
        summary.total, summary.pending, summary.success, user_text
    )
}

#[derive(Debug)]
pub struct ChatView {
    messages: Vec<ChatMessage>,
    pub input: String,
    loading: bool,
}

impl Default for ChatView {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::bot(GREETING)],
            input: String::new(),
            loading: false,
        }
    }
}

impl ChatView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Send the current input.
    ///
    /// Blank input is ignored. Otherwise the user message is appended and the
    /// input cleared before anything goes out; the bot reply or an
    /// `Error: ...` message always follows, so the conversation never ends on
    /// an unanswered user message.
    pub async fn send(&mut self, client: &ApiClient, session: &Session) -> ViewResult<()> {
        if is_blank(&self.input) {
            return Ok(());
        }
        let text = std::mem::take(&mut self.input);
        self.messages.push(ChatMessage::user(text.clone()));
        self.loading = true;

        let reply = ask(client, session, &text).await;

        self.loading = false;
        match reply {
            Ok(reply) => {
                self.messages.push(ChatMessage::bot(reply));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Assistant request failed");
                self.messages
                    .push(ChatMessage::bot(format!("Error: {}", e.user_message())));
                Err(e.into())
            }
        }
    }
}

async fn ask(client: &ApiClient, session: &Session, text: &str) -> ClientResult<String> {
    let page = client
        .list_payments(session, &PaymentQuery::page(0, PROMPT_SAMPLE_SIZE))
        .await?;
    let prompt = build_prompt(&PaymentSummary::from(&page), text);
    client.send_chat(session, &prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;

    #[test]
    fn test_prompt_carries_figures_and_text() {
        let summary = PaymentSummary { total: 10, pending: 2, success: 7 };
        let prompt = build_prompt(&summary, "How are sales?");
        assert!(prompt.contains("Total payments: 10"));
        assert!(prompt.contains("Pending payments: 2"));
        assert!(prompt.contains("Successful payments: 7"));
        assert!(prompt.contains("User prompt: How are sales?"));
    }

    #[test]
    fn test_seeded_with_greeting() {
        let view = ChatView::new();
        assert_eq!(view.messages().len(), 1);
        assert_eq!(view.messages()[0].sender, Sender::Bot);
        assert_eq!(view.messages()[0].text, GREETING);
        assert!(!view.is_loading());
    }
}
