use bytes::Bytes;
use mime::Mime;

/// How the attachment is presented to the recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Ordinary file attachment
    Attachment,

    /// Embedded resource referenced from the HTML body
    Inline,
}

impl Default for Disposition {
    fn default() -> Self {
        Disposition::Attachment
    }
}

/// File attached to a message
///
/// # Example
///
/// ```
/// use mandrillmessage::{Attachment, Disposition};
///
/// let report = Attachment::new("report.csv", "text/csv".parse().unwrap(), "a,b\r\n1,2\r\n");
/// let logo = Attachment::new("logo.png", mime::IMAGE_PNG, vec![0x89, b'P', b'N', b'G'])
///     .with_disposition(Disposition::Inline);
///
/// assert_eq!(report.disposition(), Disposition::Attachment);
/// assert_eq!(logo.disposition(), Disposition::Inline);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    filename: String,
    content_type: Mime,
    content: Bytes,
    disposition: Disposition,
}

impl Attachment {
    /// Create ordinary attachment
    pub fn new<N, C>(filename: N, content_type: Mime, content: C) -> Self
    where
        N: Into<String>,
        C: Into<Bytes>,
    {
        Attachment {
            filename: filename.into(),
            content_type,
            content: content.into(),
            disposition: Disposition::default(),
        }
    }

    /// Set the disposition and move the Attachment
    ///
    /// Useful for the "builder-style" pattern.
    #[inline]
    pub fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }

    #[inline]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[inline]
    pub fn content_type(&self) -> &Mime {
        &self.content_type
    }

    /// Raw contents
    #[inline]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    #[inline]
    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    #[inline]
    pub fn is_inline(&self) -> bool {
        self.disposition == Disposition::Inline
    }
}

#[cfg(test)]
mod test {
    use super::{Attachment, Disposition};

    #[test]
    fn ordinary_by_default() {
        let attachment = Attachment::new("notes.txt", mime::TEXT_PLAIN, "notes");
        assert_eq!(attachment.disposition(), Disposition::Attachment);

        let inline = attachment.with_disposition(Disposition::Inline);
        assert!(inline.is_inline());
    }

    #[test]
    fn attachment_keeps_bytes() {
        let attachment = Attachment::new("blob.bin", mime::APPLICATION_OCTET_STREAM, vec![0u8, 159, 146, 150]);

        assert_eq!(attachment.filename(), "blob.bin");
        assert_eq!(attachment.content_type().as_ref(), "application/octet-stream");
        assert_eq!(attachment.content(), &[0u8, 159, 146, 150][..]);
        assert!(!attachment.is_inline());
    }
}
