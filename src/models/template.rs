//! Template models.

use super::notification::NotificationType;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored message pattern with `((placeholder))` fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: NotificationType,
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    pub created_by: String,
    pub version: u32,
    pub body: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub letter_contact_block: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateList {
    pub templates: Vec<Template>,
}

/// Template rendered with personalisation, without sending anything
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePreview {
    pub id: String,
    #[serde(rename = "type")]
    pub template_type: NotificationType,
    pub version: u32,
    pub body: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}
