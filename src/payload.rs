//! Mandrill `message` object
//!
//! Field names follow the `messages/send` API schema.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Role of a recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    To,
    Cc,
    Bcc,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipient {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: RecipientKind,
}

/// Attachment with base64 encoded contents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedAttachment {
    #[serde(rename = "type")]
    pub content_type: String,
    pub name: String,
    pub content: String,
}

/// Translated message, ready to be sent
///
/// `text` and `html` serialize as `null` when missing. Directive fields are
/// left out unless the message carried the matching `X-MC-*` header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub subject: String,
    pub from_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    pub text: Option<String>,
    pub html: Option<String>,
    pub to: Vec<Recipient>,
    pub tags: Vec<String>,
    pub headers: BTreeMap<String, String>,
    pub attachments: Vec<EncodedAttachment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_opens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_clicks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_css: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_text: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_recipients: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Payload {
    /// Convert into a JSON value
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
