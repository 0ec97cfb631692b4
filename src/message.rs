use crate::attachment::Attachment;
use crate::header::{Header, Headers};
use crate::mailbox::{Mailbox, Mailboxes};
use mime::Mime;

/// One representation of the message body
///
/// A missing content type means `text/plain`.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyPart {
    content: String,
    content_type: Option<Mime>,
}

impl BodyPart {
    #[inline]
    pub fn new<T: Into<String>>(content: T, content_type: Option<Mime>) -> Self {
        BodyPart {
            content: content.into(),
            content_type,
        }
    }

    /// Shortcut for `BodyPart::new(content, Some(mime::TEXT_PLAIN))`.
    #[inline]
    pub fn plain<T: Into<String>>(content: T) -> Self {
        Self::new(content, Some(mime::TEXT_PLAIN))
    }

    /// Shortcut for `BodyPart::new(content, Some(mime::TEXT_HTML))`.
    #[inline]
    pub fn html<T: Into<String>>(content: T) -> Self {
        Self::new(content, Some(mime::TEXT_HTML))
    }

    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[inline]
    pub fn content_type(&self) -> Option<&Mime> {
        self.content_type.as_ref()
    }

    /// Whether the part is `text/plain`, ignoring parameters and case
    pub fn is_plain(&self) -> bool {
        self.content_type
            .as_ref()
            .map_or(true, |m| m.type_() == mime::TEXT && m.subtype() == mime::PLAIN)
    }

    /// Whether the part is `text/html`, ignoring parameters and case
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_ref()
            .map_or(false, |m| m.type_() == mime::TEXT && m.subtype() == mime::HTML)
    }
}

/// Read access to a composed message
///
/// This is everything the translator needs to know about a message.
pub trait Email {
    fn subject(&self) -> &str;

    /// Primary body supplied when the message was composed
    fn body(&self) -> Option<&BodyPart>;

    /// Alternative representations of the body, in insertion order
    fn parts(&self) -> &[BodyPart];

    /// Custom headers, including `X-MC-*` directives
    fn headers(&self) -> &Headers;

    fn attachments(&self) -> &[Attachment];

    fn from(&self) -> Option<&Mailbox>;

    fn to(&self) -> &Mailboxes;

    fn cc(&self) -> &Mailboxes;

    fn bcc(&self) -> &Mailboxes;

    fn reply_to(&self) -> &Mailboxes;
}

/// Composed email message
///
/// # Example
///
/// ```
/// use mandrillmessage::{BodyPart, Email, Message};
///
/// let message = Message::new()
///     .with_subject("Happy new year")
///     .with_from(("nobody@domain.tld", "NoBody").into())
///     .with_to("Hei <hei@domain.tld>".parse().unwrap())
///     .with_body(BodyPart::plain("Be happy!"))
///     .with_part(BodyPart::html("<p>Be happy!</p>"))
///     .with_raw_header("X-MC-Tags", "greetings");
///
/// assert_eq!(message.parts().len(), 1);
/// assert_eq!(message.to().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Message {
    subject: String,
    body: Option<BodyPart>,
    parts: Vec<BodyPart>,
    headers: Headers,
    attachments: Vec<Attachment>,
    from: Option<Mailbox>,
    to: Mailboxes,
    cc: Mailboxes,
    bcc: Mailboxes,
    reply_to: Mailboxes,
}

impl Message {
    /// Constructs an empty message
    #[inline]
    pub fn new() -> Self {
        Message {
            subject: String::new(),
            body: None,
            parts: Vec::new(),
            headers: Headers::new(),
            attachments: Vec::new(),
            from: None,
            to: Mailboxes::new(),
            cc: Mailboxes::new(),
            bcc: Mailboxes::new(),
            reply_to: Mailboxes::new(),
        }
    }

    /// Get a mutable reference to the headers.
    #[inline]
    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    #[inline]
    pub fn with_subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the primary body and move the Message.
    #[inline]
    pub fn with_body(mut self, body: BodyPart) -> Self {
        self.body = Some(body);
        self
    }

    /// Add an alternative body part and move the Message.
    #[inline]
    pub fn with_part(mut self, part: BodyPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Set a typed header and move the Message.
    ///
    /// Useful for the "builder-style" pattern.
    #[inline]
    pub fn with_header<H: Header>(mut self, header: H) -> Self {
        self.headers.set(header);
        self
    }

    /// Append a raw header value and move the Message.
    ///
    /// Values appended under the same name (in any case) are kept in order.
    #[inline]
    pub fn with_raw_header<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        self.headers.append_raw(name, value);
        self
    }

    #[inline]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    #[inline]
    pub fn with_from(mut self, mbox: Mailbox) -> Self {
        self.from = Some(mbox);
        self
    }

    #[inline]
    pub fn with_to(mut self, mbox: Mailbox) -> Self {
        self.to.push(mbox);
        self
    }

    #[inline]
    pub fn with_cc(mut self, mbox: Mailbox) -> Self {
        self.cc.push(mbox);
        self
    }

    #[inline]
    pub fn with_bcc(mut self, mbox: Mailbox) -> Self {
        self.bcc.push(mbox);
        self
    }

    #[inline]
    pub fn with_reply_to(mut self, mbox: Mailbox) -> Self {
        self.reply_to.push(mbox);
        self
    }
}

impl Default for Message {
    fn default() -> Self {
        Message::new()
    }
}

impl Email for Message {
    fn subject(&self) -> &str {
        &self.subject
    }

    fn body(&self) -> Option<&BodyPart> {
        self.body.as_ref()
    }

    fn parts(&self) -> &[BodyPart] {
        &self.parts
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }

    fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    fn from(&self) -> Option<&Mailbox> {
        self.from.as_ref()
    }

    fn to(&self) -> &Mailboxes {
        &self.to
    }

    fn cc(&self) -> &Mailboxes {
        &self.cc
    }

    fn bcc(&self) -> &Mailboxes {
        &self.bcc
    }

    fn reply_to(&self) -> &Mailboxes {
        &self.reply_to
    }
}

#[cfg(test)]
mod test {
    use super::{BodyPart, Email, Message};
    use crate::header::Tags;

    #[test]
    fn content_type_matching() {
        assert!(BodyPart::new("Foo bar", None).is_plain());
        assert!(BodyPart::plain("Foo bar").is_plain());
        assert!(BodyPart::new("Foo bar", Some(mime::TEXT_PLAIN_UTF_8)).is_plain());
        assert!(BodyPart::new("<p>Foo bar</p>", Some("TEXT/HTML; charset=UTF-8".parse().unwrap())).is_html());
        assert!(!BodyPart::new("Foo bar", None).is_html());

        let calendar = BodyPart::new("BEGIN:VCALENDAR", Some("text/calendar".parse().unwrap()));
        assert!(!calendar.is_plain());
        assert!(!calendar.is_html());
    }

    #[test]
    fn builder_keeps_order() {
        let message = Message::new()
            .with_subject("Test Subject")
            .with_body(BodyPart::html("<p>Foo bar</p>"))
            .with_part(BodyPart::plain("Foo bar"))
            .with_part(BodyPart::plain("Foo baz"))
            .with_cc(("cc-1@example.com", "CC 1 Name").into())
            .with_cc(("cc-2@example.com", "CC 2 Name").into());

        assert_eq!(message.subject(), "Test Subject");
        assert_eq!(message.body(), Some(&BodyPart::html("<p>Foo bar</p>")));
        assert_eq!(message.parts()[1].content(), "Foo baz");
        assert_eq!(
            message.cc().iter().map(|m| m.email.to_string()).collect::<Vec<_>>(),
            vec!["cc-1@example.com", "cc-2@example.com"]
        );
        assert!(message.from().is_none());
    }

    #[test]
    fn repeated_raw_headers() {
        let message = Message::new()
            .with_raw_header("Reply-To", "a@example.com")
            .with_raw_header("reply-to", "b@example.com")
            .with_header(Tags(vec!["foo".into()]));

        assert_eq!(message.headers().get_raw("REPLY-TO").map(<[_]>::len), Some(2));
        assert_eq!(message.headers().get::<Tags>(), Some(Tags(vec!["foo".into()])));
    }

    #[test]
    fn shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Message>();
        assert_send_sync::<BodyPart>();
    }
}
