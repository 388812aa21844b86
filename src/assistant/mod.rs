//! The two text-service features: free-text chat and species cards.
//!
//! Both check for a stored key first and never call the service without
//! one. Every failure comes back as displayable text: callers never get an
//! error to handle.

pub mod markup;
pub mod species;

use crate::net::{CredentialStore, ServiceError, TextService};

use markup::Block;
pub use species::{parse_species, species_prompt, strip_code_fences, SpeciesCard};

/// Result of a chat question, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub blocks: Vec<Block>,
    pub is_error: bool,
}

impl ChatReply {
    fn error(message: &str) -> Self {
        Self {
            blocks: markup::plain(message),
            is_error: true,
        }
    }
}

/// Result of a species request, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeciesOutcome {
    Card(SpeciesCard),
    Failed(String),
}

/// Prompt for the free-text chat box.
pub fn chat_prompt(question: &str) -> String {
    format!(
        "You are the friendly guide of an illustrated pop-up book about honey bees, \
         wild pollinators and the flowers they depend on. Answer the reader's question \
         in at most three short paragraphs. Use Markdown bullets only when listing.\n\n\
         Question: {}",
        question.trim()
    )
}

pub struct Assistant<S, C> {
    service: S,
    credentials: C,
}

impl<S: TextService, C: CredentialStore> Assistant<S, C> {
    pub fn new(service: S, credentials: C) -> Self {
        Self {
            service,
            credentials,
        }
    }

    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_configured()
    }

    fn call(&self, prompt: &str) -> Result<String, ServiceError> {
        let key = self.credentials.get().ok_or(ServiceError::NotConfigured)?;
        self.service.generate(&key, prompt).map_err(|e| {
            log::warn!("Text service call failed: {}", e.diagnostic());
            e
        })
    }

    /// Free-text mode: answer `question` as formatted text.
    pub fn ask(&self, question: &str) -> ChatReply {
        if question.trim().is_empty() {
            return ChatReply::error("Type a question for the hive first.");
        }
        match self.call(&chat_prompt(question)) {
            Ok(text) => {
                let blocks = markup::parse_blocks(&text);
                if blocks.is_empty() {
                    ChatReply::error("The hive had nothing to say. Try asking another way.")
                } else {
                    ChatReply {
                        blocks,
                        is_error: false,
                    }
                }
            }
            Err(e) => ChatReply::error(&e.to_string()),
        }
    }

    /// Structured mode: fetch and parse a species card.
    pub fn describe_species(&self, species: &str) -> SpeciesOutcome {
        if species.trim().is_empty() {
            return SpeciesOutcome::Failed("Enter a species name first.".to_string());
        }
        let raw = match self.call(&species_prompt(species)) {
            Ok(raw) => raw,
            Err(e) => return SpeciesOutcome::Failed(e.to_string()),
        };
        match parse_species(&raw) {
            Ok(card) => SpeciesOutcome::Card(card),
            Err(diagnostic) => {
                log::warn!("Species reply was not usable ({}): {}", diagnostic, raw);
                SpeciesOutcome::Failed(
                    "Couldn't read the species card from the reply. Please try again.".to_string(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::MemoryCredentialStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockService {
        reply: Result<String, ServiceError>,
        calls: AtomicUsize,
        last_key: Mutex<Option<String>>,
    }

    impl MockService {
        fn replying(reply: Result<&str, ServiceError>) -> Self {
            Self {
                reply: reply.map(str::to_string),
                calls: AtomicUsize::new(0),
                last_key: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl TextService for MockService {
        fn generate(&self, api_key: &str, _prompt: &str) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_key.lock().unwrap() = Some(api_key.to_string());
            self.reply.clone()
        }
    }

    fn assistant(
        reply: Result<&str, ServiceError>,
        key: Option<&str>,
    ) -> Assistant<MockService, MemoryCredentialStore> {
        let store = match key {
            Some(k) => MemoryCredentialStore::with_key(k),
            None => MemoryCredentialStore::new(),
        };
        Assistant::new(MockService::replying(reply), store)
    }

    #[test]
    fn no_credential_means_no_call() {
        let a = assistant(Ok("unused"), None);

        let reply = a.ask("Why do bees buzz?");
        assert!(reply.is_error);
        assert_eq!(
            reply.blocks[0].plain_text(),
            ServiceError::NotConfigured.to_string()
        );

        match a.describe_species("Honey bee") {
            SpeciesOutcome::Failed(msg) => assert_eq!(msg, ServiceError::NotConfigured.to_string()),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(a.service.calls(), 0);
    }

    #[test]
    fn chat_reply_is_formatted() {
        let a = assistant(Ok("**Bees** dance.\n\n* waggle\n* round"), Some("key-1"));
        let reply = a.ask("How do bees talk?");
        assert!(!reply.is_error);
        assert_eq!(reply.blocks.len(), 3);
        assert_eq!(a.service.calls(), 1);
        assert_eq!(
            a.service.last_key.lock().unwrap().as_deref(),
            Some("key-1")
        );
    }

    #[test]
    fn transport_failure_becomes_inline_text() {
        let a = assistant(Err(ServiceError::Status(403)), Some("k"));
        let reply = a.ask("Anything?");
        assert!(reply.is_error);
        assert_eq!(
            reply.blocks[0].plain_text(),
            ServiceError::Status(403).to_string()
        );
    }

    #[test]
    fn fenced_species_json_parses() {
        let a = assistant(
            Ok("```json\n{\"name\":\"X\",\"diet\":\"Nectar\"}\n```"),
            Some("k"),
        );
        match a.describe_species("X") {
            SpeciesOutcome::Card(card) => {
                assert_eq!(card.name, "X");
                assert_eq!(card.diet, "Nectar");
            }
            other => panic!("expected card, got {:?}", other),
        }
    }

    #[test]
    fn non_json_species_reply_fails_inline() {
        let a = assistant(Ok("Bees are lovely but here is no JSON."), Some("k"));
        assert!(matches!(
            a.describe_species("Carpenter bee"),
            SpeciesOutcome::Failed(_)
        ));
        assert_eq!(a.service.calls(), 1);
    }

    #[test]
    fn blank_input_skips_the_call() {
        let a = assistant(Ok("unused"), Some("k"));
        assert!(a.ask("   ").is_error);
        assert!(matches!(a.describe_species(""), SpeciesOutcome::Failed(_)));
        assert_eq!(a.service.calls(), 0);
    }
}
