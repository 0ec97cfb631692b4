use crate::attachment::Attachment;
use crate::config::{HeaderCollapse, ReplyToPolicy, TranslatorConfig};
use crate::encoder;
use crate::error::{Result, TranslateError};
use crate::header::{
    is_directive, raw_lossy, raw_values, AutoText, Header, Headers, Important, InlineCss, Metadata,
    PreserveRecipients, Subaccount, Tags, Track, REPLY_TO,
};
use crate::mailbox::{Mailbox, Mailboxes};
use crate::message::{BodyPart, Email};
use crate::payload::{EncodedAttachment, Payload, Recipient, RecipientKind};
use log::{debug, trace};
use std::collections::BTreeMap;

/// Translates composed messages into Mandrill payloads
///
/// The translator keeps no state besides its configuration, so one instance
/// can be shared between threads and reused for any number of messages.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    /// Translator with default policies
    #[inline]
    pub fn new() -> Self {
        Translator::default()
    }

    #[inline]
    pub fn with_config(config: TranslatorConfig) -> Self {
        Translator { config }
    }

    #[inline]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Build the payload for a message
    ///
    /// Fails only when the message breaks its contract: no sender, a header
    /// which is not UTF-8, or a malformed `X-MC-*` directive.
    pub fn translate<E: Email + ?Sized>(&self, message: &E) -> Result<Payload> {
        let from = message.from().ok_or(TranslateError::MissingSender)?;
        debug!("translating message {:?} from {}", message.subject(), from.email);

        let (text, html) = resolve_bodies(message.body().into_iter().chain(message.parts()));
        let headers = message.headers();
        let track = directive::<Track>(headers)?;

        Ok(Payload {
            subject: message.subject().into(),
            from_email: from.email.to_string(),
            from_name: from.display_name().map(String::from),
            text,
            html,
            to: recipients(message),
            tags: directive::<Tags>(headers)?.unwrap_or_default().0,
            headers: self.pass_through(headers, message.reply_to())?,
            attachments: encode_attachments(message.attachments()),
            subaccount: directive::<Subaccount>(headers)?.map(|Subaccount(s)| s),
            important: directive::<Important>(headers)?.map(|Important(on)| on),
            track_opens: track.map(|track| track.opens),
            track_clicks: track.map(|track| track.clicks),
            inline_css: directive::<InlineCss>(headers)?.map(|InlineCss(on)| on),
            auto_text: directive::<AutoText>(headers)?.map(|AutoText(on)| on),
            preserve_recipients: directive::<PreserveRecipients>(headers)?
                .map(|PreserveRecipients(on)| on),
            metadata: directive::<Metadata>(headers)?.map(|Metadata(map)| map),
        })
    }

    /// Copy every non-directive header, folding repeated values
    fn pass_through(
        &self,
        headers: &Headers,
        reply_to: &Mailboxes,
    ) -> Result<BTreeMap<String, String>> {
        let mut output = BTreeMap::new();
        let mut literal_reply_to = Vec::new();

        for (name, lines) in headers.iter() {
            if is_directive(name) {
                continue;
            }
            let values = raw_values(name, lines)?;

            if name.eq_ignore_ascii_case(REPLY_TO) {
                literal_reply_to = values;
                continue;
            }
            if values.len() > 1 {
                debug!(
                    "collapsing {} values of header {} ({:?})",
                    values.len(),
                    name,
                    self.config.header_collapse
                );
            }
            if let Some(value) = self.config.header_collapse.collapse(values) {
                output.insert(name.to_owned(), value);
            }
        }

        let structured: Vec<String> = reply_to.iter().map(format_reply_to).collect();
        let values = match self.config.reply_to {
            ReplyToPolicy::PreferStructured if structured.is_empty() => literal_reply_to,
            ReplyToPolicy::PreferStructured => structured,
            ReplyToPolicy::PreferLiteral if literal_reply_to.is_empty() => structured,
            ReplyToPolicy::PreferLiteral => literal_reply_to,
            ReplyToPolicy::Merge => {
                let mut merged = literal_reply_to;
                merged.extend(structured);
                merged
            }
        };
        // Reply-To is an address list, its values always join.
        if let Some(value) = HeaderCollapse::Join.collapse(values) {
            output.insert(REPLY_TO.to_owned(), value);
        }

        Ok(output)
    }
}

/// Translate a message with the default policies
///
/// # Example
///
/// ```
/// use mandrillmessage::{translate, BodyPart, Message};
///
/// let message = Message::new()
///     .with_subject("Test Subject")
///     .with_from(("from@example.com", "From Name").into())
///     .with_to(("to@example.com", "To Name").into())
///     .with_body(BodyPart::new("Foo bar", None))
///     .with_part(BodyPart::html("<p>Foo bar</p>"))
///     .with_raw_header("X-MC-Tags", "foo,bar");
///
/// let payload = translate(&message).unwrap();
///
/// assert_eq!(payload.text.as_ref().map(String::as_str), Some("Foo bar"));
/// assert_eq!(payload.html.as_ref().map(String::as_str), Some("<p>Foo bar</p>"));
/// assert_eq!(payload.tags, vec!["foo", "bar"]);
/// ```
pub fn translate<E: Email + ?Sized>(message: &E) -> Result<Payload> {
    Translator::new().translate(message)
}

/// Pick the first plaintext and the first HTML part, in candidate order
fn resolve_bodies<'a, I>(candidates: I) -> (Option<String>, Option<String>)
where
    I: IntoIterator<Item = &'a BodyPart>,
{
    let mut text = None;
    let mut html = None;

    for part in candidates {
        if text.is_none() && part.is_plain() {
            trace!("plaintext body found");
            text = Some(part.content().to_owned());
        } else if html.is_none() && part.is_html() {
            trace!("html body found");
            html = Some(part.content().to_owned());
        } else {
            trace!("skipping body part of type {:?}", part.content_type());
        }

        if text.is_some() && html.is_some() {
            break;
        }
    }

    (text, html)
}

fn recipients<E: Email + ?Sized>(message: &E) -> Vec<Recipient> {
    let groups = [
        (RecipientKind::To, message.to()),
        (RecipientKind::Cc, message.cc()),
        (RecipientKind::Bcc, message.bcc()),
    ];

    groups
        .iter()
        .flat_map(|&(kind, list)| {
            list.iter().map(move |mbox| Recipient {
                email: mbox.email.to_string(),
                name: mbox.display_name().map(String::from),
                kind,
            })
        })
        .collect()
}

// email <name>, as Mandrill expects it
fn format_reply_to(mbox: &Mailbox) -> String {
    match mbox.display_name() {
        Some(name) => format!("{} <{}>", mbox.email, name),
        None => mbox.email.to_string(),
    }
}

fn encode_attachments(attachments: &[Attachment]) -> Vec<EncodedAttachment> {
    attachments
        .iter()
        .filter(|attachment| {
            if attachment.is_inline() {
                debug!("skipping inline attachment {}", attachment.filename());
            }
            !attachment.is_inline()
        })
        .map(|attachment| EncodedAttachment {
            content_type: attachment.content_type().to_string(),
            name: attachment.filename().into(),
            content: encoder::encode(attachment.content()),
        })
        .collect()
}

/// Parse a directive header, `None` when it is absent
fn directive<H: Header>(headers: &Headers) -> Result<Option<H>> {
    match headers.to_raw(H::header_name()) {
        None => Ok(None),
        Some(raw) => H::parse_header(&raw)
            .map(Some)
            .map_err(|_| TranslateError::InvalidDirective {
                name: H::header_name(),
                value: raw_lossy(&raw),
            }),
    }
}
