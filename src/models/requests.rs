//! Request bodies for the send endpoints.
//!
//! Optional fields are omitted from the JSON body when unset.

use super::personalisation::{Personalisation, PersonalisationValue};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Postage class for precompiled letters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Postage {
    First,
    Second,
    Economy,
    Europe,
    RestOfWorld,
}

impl Postage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Postage::First => "first",
            Postage::Second => "second",
            Postage::Economy => "economy",
            Postage::Europe => "europe",
            Postage::RestOfWorld => "rest-of-world",
        }
    }
}

impl fmt::Display for Postage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Postage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(Postage::First),
            "second" => Ok(Postage::Second),
            "economy" => Ok(Postage::Economy),
            "europe" => Ok(Postage::Europe),
            "rest-of-world" => Ok(Postage::RestOfWorld),
            _ => Err(format!(
                "postage {} is not one of [first, second, economy, europe, rest-of-world]",
                s
            )),
        }
    }
}

/// Body of `POST /v2/notifications/sms`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmsRequest {
    pub phone_number: String,
    pub template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personalisation: Option<Personalisation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_sender_id: Option<String>,
}

impl SmsRequest {
    pub fn new(phone_number: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            template_id: template_id.into(),
            personalisation: None,
            reference: None,
            sms_sender_id: None,
        }
    }

    pub fn personalisation(mut self, personalisation: Personalisation) -> Self {
        self.personalisation = Some(personalisation);
        self
    }

    /// Adds a single placeholder value, creating the map when needed
    pub fn placeholder(
        mut self,
        name: impl Into<String>,
        value: impl Into<PersonalisationValue>,
    ) -> Self {
        self.personalisation
            .get_or_insert_with(Personalisation::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn sms_sender_id(mut self, sms_sender_id: impl Into<String>) -> Self {
        self.sms_sender_id = Some(sms_sender_id.into());
        self
    }
}

/// Body of `POST /v2/notifications/email`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailRequest {
    pub email_address: String,
    pub template_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personalisation: Option<Personalisation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_reply_to_id: Option<String>,
}

impl EmailRequest {
    pub fn new(email_address: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            email_address: email_address.into(),
            template_id: template_id.into(),
            personalisation: None,
            reference: None,
            email_reply_to_id: None,
        }
    }

    pub fn personalisation(mut self, personalisation: Personalisation) -> Self {
        self.personalisation = Some(personalisation);
        self
    }

    pub fn placeholder(
        mut self,
        name: impl Into<String>,
        value: impl Into<PersonalisationValue>,
    ) -> Self {
        self.personalisation
            .get_or_insert_with(Personalisation::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn email_reply_to_id(mut self, email_reply_to_id: impl Into<String>) -> Self {
        self.email_reply_to_id = Some(email_reply_to_id.into());
        self
    }
}

/// Body of `POST /v2/notifications/letter` for a templated letter.
///
/// The address comes from the `address_line_*` and `postcode` keys of the
/// personalisation, so it is always sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterRequest {
    pub template_id: String,
    pub personalisation: Personalisation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl LetterRequest {
    pub fn new(template_id: impl Into<String>, personalisation: Personalisation) -> Self {
        Self {
            template_id: template_id.into(),
            personalisation,
            reference: None,
        }
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// Body of `POST /v2/notifications/letter` for a ready-made PDF
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrecompiledLetterRequest {
    pub reference: String,
    /// Base64 encoded PDF
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postage: Option<Postage>,
}

impl PrecompiledLetterRequest {
    pub fn new(reference: impl Into<String>, pdf: &[u8]) -> Self {
        Self {
            reference: reference.into(),
            content: STANDARD.encode(pdf),
            postage: None,
        }
    }

    pub fn postage(mut self, postage: Postage) -> Self {
        self.postage = Some(postage);
        self
    }
}

/// Body of `POST /v2/template/{id}/preview`
#[derive(Debug, Serialize)]
pub(crate) struct PreviewRequest<'a> {
    pub personalisation: &'a Personalisation,
}
