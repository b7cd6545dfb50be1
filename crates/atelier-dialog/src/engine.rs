// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation state machine.
//!
//! Given a conversation record and one inbound event, decides the next
//! state, mutates the record in place, and sends at most one scripted
//! prompt through the injected [`Notifier`]. Persistence is the caller's
//! job — the engine never touches the store.
//!
//! Send failures are logged and swallowed: the conversation advances even
//! when the scripted prompt failed to deliver.

use std::sync::Arc;

use atelier_core::types::{Conversation, LeadState};
use atelier_core::Notifier;
use tracing::{debug, warn};

use crate::extract::{extract_name, extract_phone, strip_phone};
use crate::script;

/// A platform-native "share contact" payload, delivered out-of-band from
/// free text.
#[derive(Debug, Clone)]
pub struct ContactShare {
    pub phone_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// Drives one conversation through the qualification script.
pub struct DialogEngine {
    notifier: Arc<dyn Notifier>,
}

impl DialogEngine {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Process one inbound text message.
    ///
    /// Exactly one scripted message is sent per call, except from the
    /// terminal states (`Handover`, `Active`) where the bot stays silent.
    pub async fn advance(&self, conversation: &mut Conversation, text: &str) -> LeadState {
        let chat_id = conversation.chat_id;

        match conversation.state {
            LeadState::Greeting => {
                conversation.state = LeadState::Qualify;
                conversation.current_question = Some(0);
                self.send(chat_id, script::QUALIFY_QUESTIONS[0]).await;
            }

            LeadState::Qualify => {
                let index = conversation.current_question.unwrap_or(0) as usize;
                conversation
                    .answers
                    .insert(script::answer_key(index), text.to_string());

                let next = index + 1;
                if next < script::QUALIFY_QUESTIONS.len() {
                    conversation.current_question = Some(next as u32);
                    self.send(chat_id, script::QUALIFY_QUESTIONS[next]).await;
                } else {
                    // Script exhausted: move on to contact collection.
                    conversation.state = LeadState::Contact;
                    conversation.current_question = None;
                    self.send(chat_id, script::CONTACT_MESSAGE).await;
                }
            }

            LeadState::Contact => {
                // First writer wins: an already-set field is never
                // overwritten by a later extraction.
                if conversation.phone.is_none()
                    && let Some(phone) = extract_phone(text)
                {
                    conversation.phone = Some(phone);
                }
                if conversation.name.is_none()
                    && let Some(name) = extract_name(&strip_phone(text))
                {
                    conversation.name = Some(name);
                }

                if conversation.phone.is_some() && conversation.name.is_some() {
                    conversation.state = LeadState::Handover;
                    self.send(chat_id, script::HANDOVER_MESSAGE).await;
                } else {
                    let prompt = script::missing_contact_prompt(
                        conversation.phone.is_none(),
                        conversation.name.is_none(),
                    );
                    self.send(chat_id, &prompt).await;
                }
            }

            // Terminal for the bot: the message is logged by the caller,
            // nothing is sent, nothing changes.
            LeadState::Handover | LeadState::Active => {}
        }

        debug!(chat_id, state = %conversation.state, "dialogue advanced");
        conversation.state
    }

    /// Process a photo-only message on a brand-new conversation: skip the
    /// greeting step and open the script directly. No-op in any other state.
    pub async fn advance_media_only(&self, conversation: &mut Conversation) -> LeadState {
        if conversation.state == LeadState::Greeting {
            conversation.state = LeadState::Qualify;
            conversation.current_question = Some(0);
            self.send(conversation.chat_id, &script::photo_opening())
                .await;
        }
        conversation.state
    }

    /// Apply a platform contact share.
    ///
    /// The share payload is authoritative and overwrites extracted values.
    /// If it arrives in the `Contact` state, the handover transition and
    /// confirmation fire in the same call.
    pub async fn apply_contact(
        &self,
        conversation: &mut Conversation,
        share: &ContactShare,
    ) -> LeadState {
        conversation.phone = Some(share.phone_number.clone());
        let name = match &share.last_name {
            Some(last) => format!("{} {last}", share.first_name),
            None => share.first_name.clone(),
        };
        conversation.name = Some(name);

        if conversation.state == LeadState::Contact {
            conversation.state = LeadState::Handover;
            self.send(conversation.chat_id, script::HANDOVER_MESSAGE)
                .await;
        }
        conversation.state
    }

    async fn send(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.notifier.send_text(chat_id, text).await {
            warn!(chat_id, error = %e, "scripted prompt delivery failed");
        }
    }
}
