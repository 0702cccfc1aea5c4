//! Notification models returned by the notifications endpoints.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Enums
// ============================================================================

/// Channel a notification or template is delivered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Sms,
    Email,
    Letter,
}

impl NotificationType {
    pub const ALL: [NotificationType; 3] = [
        NotificationType::Sms,
        NotificationType::Email,
        NotificationType::Letter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Sms => "sms",
            NotificationType::Email => "email",
            NotificationType::Letter => "letter",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sms" => Ok(NotificationType::Sms),
            "email" => Ok(NotificationType::Email),
            "letter" => Ok(NotificationType::Letter),
            _ => Err(format!(
                "type {} is not one of [sms, email, letter]",
                s
            )),
        }
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

/// Template reference embedded in notification responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    pub id: String,
    pub version: u32,
    pub uri: String,
}

/// Paging links attached to list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub current: String,
    #[serde(default)]
    pub next: Option<String>,
}

// ============================================================================
// Notification
// ============================================================================

/// A notification as stored by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub line_1: Option<String>,
    #[serde(default)]
    pub line_2: Option<String>,
    #[serde(default)]
    pub line_3: Option<String>,
    #[serde(default)]
    pub line_4: Option<String>,
    #[serde(default)]
    pub line_5: Option<String>,
    #[serde(default)]
    pub line_6: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub postage: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub status: String,
    pub template: TemplateRef,
    pub body: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub created_at: Timestamp,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default)]
    pub sent_at: Option<Timestamp>,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub estimated_delivery: Option<Timestamp>,
}

/// One page of notifications, newest first as ordered by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationList {
    pub notifications: Vec<Notification>,
    pub links: Links,
}

/// Optional filters for listing notifications; unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    pub template_type: Option<NotificationType>,
    pub status: Option<String>,
    pub reference: Option<String>,
    /// Return notifications older than this notification id
    pub older_than: Option<String>,
}

impl NotificationFilter {
    pub fn template_type(mut self, template_type: NotificationType) -> Self {
        self.template_type = Some(template_type);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn older_than(mut self, id: impl Into<String>) -> Self {
        self.older_than = Some(id.into());
        self
    }

    /// Query parameters for the set fields, in a stable order
    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(template_type) = self.template_type {
            pairs.push(("template_type", template_type.as_str().to_string()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(reference) = &self.reference {
            pairs.push(("reference", reference.clone()));
        }
        if let Some(older_than) = &self.older_than {
            pairs.push(("older_than", older_than.clone()));
        }
        pairs
    }
}

// ============================================================================
// Send responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsResponseContent {
    pub body: String,
    #[serde(default)]
    pub from_number: Option<String>,
}

/// Result of sending an SMS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsNotificationResponse {
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub uri: String,
    pub template: TemplateRef,
    pub content: SmsResponseContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResponseContent {
    pub body: String,
    pub subject: String,
    #[serde(default)]
    pub from_email: Option<String>,
}

/// Result of sending an email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailNotificationResponse {
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub uri: String,
    pub template: TemplateRef,
    pub content: EmailResponseContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterResponseContent {
    pub body: String,
    pub subject: String,
}

/// Result of sending a templated letter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterNotificationResponse {
    pub id: String,
    #[serde(default)]
    pub reference: Option<String>,
    pub uri: String,
    pub template: TemplateRef,
    pub content: LetterResponseContent,
    #[serde(default)]
    pub scheduled_for: Option<Timestamp>,
}

/// Result of uploading a precompiled PDF letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecompiledLetterResponse {
    pub id: String,
    pub reference: String,
    #[serde(default)]
    pub postage: Option<String>,
}
