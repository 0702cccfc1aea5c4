//! Inbound text messages received by the service's number.

use super::notification::Links;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedText {
    pub id: String,
    pub user_number: String,
    pub notify_number: String,
    pub created_at: Timestamp,
    pub service_id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedTextList {
    pub received_text_messages: Vec<ReceivedText>,
    pub links: Links,
}
