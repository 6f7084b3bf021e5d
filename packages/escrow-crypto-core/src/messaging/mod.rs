//! # Messaging Module
//!
//! Order chat on top of [`SecureChannel`]: the payloads the backend stores
//! and relays, and the decryption rules the chat panel follows.
//!
//! ## Transport Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ORDER CHAT TRANSPORT                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Send:    text ──► Conversation::seal ──► NewMessage ──► POST           │
//! │                                                                         │
//! │  History: GET ──► MessagePage ──► open_history                          │
//! │                                   (undecryptable entries dropped)       │
//! │                                                                         │
//! │  Live:    push ──► PushEvent ──► on_push                                │
//! │                                  (unrelated / undecryptable → None)     │
//! │                                                                         │
//! │  The backend only ever sees { ciphertext, nonce } plus the metadata    │
//! │  it attaches itself (id, order_id, sender_wallet, created_at).         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod delivery;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::{EncryptedEnvelope, SecureChannel};
use crate::error::Result;

/// Body of the "post message" request
pub type NewMessage = EncryptedEnvelope;

/// A stored chat message as returned by history and push
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Message id assigned by the backend
    pub id: Uuid,
    /// Order the conversation belongs to
    pub order_id: Uuid,
    /// Wallet address of the sender
    pub sender_wallet: String,
    /// Base64 sealed bytes
    pub ciphertext: String,
    /// Base64 nonce
    pub nonce: String,
    /// When the backend stored the message
    pub created_at: DateTime<Utc>,
}

/// One page of chat history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePage {
    /// Messages in ascending `created_at` order
    pub items: Vec<MessageRecord>,
    /// Total number of messages in the conversation
    pub total: u64,
}

/// Event delivered over the realtime channel for an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PushEvent {
    /// A new chat message was stored
    NewMessage {
        /// The stored message
        message: MessageRecord,
    },
    /// Any other event type on the order channel
    #[serde(other)]
    Other,
}

impl PushEvent {
    /// Parse a raw push frame
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A chat message after decryption, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptedMessage {
    /// Message id
    pub id: Uuid,
    /// Sender wallet address
    pub sender: String,
    /// Plaintext
    pub text: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Whether the local wallet sent it
    pub is_mine: bool,
}

/// The encrypted chat of one order, seen from the local wallet
pub struct Conversation {
    order_id: Uuid,
    local_wallet: String,
    channel: SecureChannel,
}

impl Conversation {
    /// Create a conversation over an established channel
    pub fn new(order_id: Uuid, local_wallet: impl Into<String>, channel: SecureChannel) -> Self {
        Self {
            order_id,
            local_wallet: local_wallet.into(),
            channel,
        }
    }

    /// The order this conversation belongs to
    pub fn order_id(&self) -> Uuid {
        self.order_id
    }

    /// Encrypt outgoing text
    ///
    /// Returns the request body for the backend and the local echo to show
    /// immediately.
    pub fn seal(&self, text: &str) -> Result<(NewMessage, DecryptedMessage)> {
        let envelope = self.channel.seal(text)?;

        let echo = DecryptedMessage {
            id: Uuid::new_v4(),
            sender: self.local_wallet.clone(),
            text: text.to_string(),
            timestamp: Utc::now(),
            is_mine: true,
        };

        Ok((envelope, echo))
    }

    /// Decrypt a single stored message
    pub fn open(&self, record: &MessageRecord) -> Result<DecryptedMessage> {
        let text = self.channel.open_parts(&record.ciphertext, &record.nonce)?;

        Ok(DecryptedMessage {
            id: record.id,
            sender: record.sender_wallet.clone(),
            text,
            timestamp: record.created_at,
            is_mine: self.is_local(&record.sender_wallet),
        })
    }

    /// Decrypt a history page, dropping entries that fail to decrypt
    ///
    /// One bad entry never costs the rest of the page. Order is preserved.
    pub fn open_history(&self, records: &[MessageRecord]) -> Vec<DecryptedMessage> {
        let opened: Vec<_> = records
            .iter()
            .filter_map(|record| match self.open(record) {
                Ok(message) => Some(message),
                Err(e) => {
                    tracing::debug!(message_id = %record.id, error = %e, "Skipping undecryptable message");
                    None
                }
            })
            .collect();

        tracing::debug!(
            order_id = %self.order_id,
            total = records.len(),
            opened = opened.len(),
            "Decrypted history page"
        );
        opened
    }

    /// Handle a realtime event
    ///
    /// Returns the decrypted message for a `new_message` event on this
    /// order. Other events, other orders, and messages that fail to decrypt
    /// yield `None`.
    pub fn on_push(&self, event: &PushEvent) -> Option<DecryptedMessage> {
        let PushEvent::NewMessage { message } = event else {
            return None;
        };

        if message.order_id != self.order_id {
            tracing::debug!(message_id = %message.id, "Ignoring push for another order");
            return None;
        }

        match self.open(message) {
            Ok(decrypted) => Some(decrypted),
            Err(e) => {
                tracing::debug!(message_id = %message.id, error = %e, "Dropping undecryptable push");
                None
            }
        }
    }

    fn is_local(&self, wallet: &str) -> bool {
        wallet.eq_ignore_ascii_case(&self.local_wallet)
    }
}

// ============================================================================
// TESTS
// ============================================================================
