//! Translate composed email messages into Mandrill API payloads.
//!
//! A [`Message`] (or anything implementing [`Email`]) is turned into a
//! [`Payload`] matching the `message` object of Mandrill's `messages/send`
//! call. Delivering the payload is left to the HTTP client of your choice.
//!
//! ```
//! use mandrillmessage::{Attachment, BodyPart, Message, Translator};
//!
//! let message = Message::new()
//!     .with_subject("Test Subject")
//!     .with_from("From Name <from@example.com>".parse().unwrap())
//!     .with_to("To Name <to@example.com>".parse().unwrap())
//!     .with_reply_to("Reply To Name <reply-to@example.com>".parse().unwrap())
//!     .with_body(BodyPart::html("<p>Foo bar</p>"))
//!     .with_attachment(Attachment::new("filename.txt", mime::TEXT_PLAIN, "FILE_CONTENTS"));
//!
//! let payload = Translator::new().translate(&message).unwrap();
//! let json = payload.to_json().unwrap();
//!
//! assert_eq!(json["html"], "<p>Foo bar</p>");
//! assert!(json["text"].is_null());
//! assert_eq!(json["headers"]["Reply-To"], "reply-to@example.com <Reply To Name>");
//! assert_eq!(json["attachments"][0]["content"], "RklMRV9DT05URU5UUw==");
//! ```

mod attachment;
mod config;
pub mod encoder;
mod error;
pub mod header;
mod mailbox;
mod message;
mod payload;
mod translator;

pub use crate::attachment::{Attachment, Disposition};
pub use crate::config::{HeaderCollapse, ReplyToPolicy, TranslatorConfig};
pub use crate::error::{Result, TranslateError};
pub use crate::mailbox::*;
pub use crate::message::{BodyPart, Email, Message};
pub use crate::payload::{EncodedAttachment, Payload, Recipient, RecipientKind};
pub use crate::translator::{translate, Translator};
