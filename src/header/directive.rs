//! Typed `X-MC-*` headers
//!
//! Mandrill reads these headers as sending options instead of delivering
//! them to recipients. Each one maps onto a field of the payload.

use hyperx::{
    header::{Formatter as HeaderFormatter, Header, Raw},
    Error as HyperError, Result as HyperResult,
};
use serde_json::{Map, Value};
use std::fmt::Result as FmtResult;
use std::str::from_utf8;

fn lines<'a>(raw: &'a Raw) -> impl Iterator<Item = HyperResult<&'a str>> + 'a {
    raw.iter()
        .map(|line| from_utf8(line).map(str::trim).map_err(|_| HyperError::Header))
}

// Single-valued directives resolve repeated values last-wins.
fn last_line(raw: &Raw) -> HyperResult<&str> {
    lines(raw).last().unwrap_or(Err(HyperError::Header))
}

fn parse_flag(value: &str) -> HyperResult<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(HyperError::Header)
    }
}

/// Comma separated tags to label the message with
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tags(pub Vec<String>);

impl Header for Tags {
    fn header_name() -> &'static str {
        "X-MC-Tags"
    }

    fn parse_header(raw: &Raw) -> HyperResult<Tags> {
        let mut tags = Vec::new();
        for line in lines(raw) {
            tags.extend(
                line?
                    .split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(String::from),
            );
        }
        Ok(Tags(tags))
    }

    fn fmt_header(&self, f: &mut HeaderFormatter) -> FmtResult {
        f.fmt_line(&self.0.join(","))
    }
}

/// Subaccount the message is sent from
#[derive(Debug, Clone, PartialEq)]
pub struct Subaccount(pub String);

impl Header for Subaccount {
    fn header_name() -> &'static str {
        "X-MC-Subaccount"
    }

    fn parse_header(raw: &Raw) -> HyperResult<Subaccount> {
        last_line(raw).and_then(|value| {
            if value.is_empty() {
                Err(HyperError::Header)
            } else {
                Ok(Subaccount(value.into()))
            }
        })
    }

    fn fmt_header(&self, f: &mut HeaderFormatter) -> FmtResult {
        f.fmt_line(&self.0)
    }
}

macro_rules! flag_directive {
    ( $(#[$doc: meta])* $type_name: ident, $header_name: expr ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $type_name(pub bool);

        impl Header for $type_name {
            fn header_name() -> &'static str {
                $header_name
            }

            fn parse_header(raw: &Raw) -> HyperResult<$type_name> {
                last_line(raw).and_then(parse_flag).map($type_name)
            }

            fn fmt_header(&self, f: &mut HeaderFormatter) -> FmtResult {
                f.fmt_line(&self.0)
            }
        }
    };
}

flag_directive!(
    /// Prioritize the message in the sending queue
    Important,
    "X-MC-Important"
);
flag_directive!(
    /// Inline CSS styles of the HTML body
    InlineCss,
    "X-MC-InlineCSS"
);
flag_directive!(
    /// Generate the plaintext body from the HTML one
    AutoText,
    "X-MC-Autotext"
);
flag_directive!(
    /// Expose every `to` recipient in the To header of each copy
    PreserveRecipients,
    "X-MC-PreserveRecipients"
);

/// Open and click tracking
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Track {
    pub opens: bool,
    pub clicks: bool,
}

impl Header for Track {
    fn header_name() -> &'static str {
        "X-MC-Track"
    }

    fn parse_header(raw: &Raw) -> HyperResult<Track> {
        let mut track = Track::default();
        for token in last_line(raw)?.split(',').map(str::trim) {
            match token.to_ascii_lowercase().as_str() {
                "" => {}
                "opens" => track.opens = true,
                "clicks" | "clicks_all" | "clicks_htmlonly" | "clicks_textonly" => {
                    track.clicks = true
                }
                _ => return Err(HyperError::Header),
            }
        }
        Ok(track)
    }

    fn fmt_header(&self, f: &mut HeaderFormatter) -> FmtResult {
        let tokens: Vec<&str> = [(self.opens, "opens"), (self.clicks, "clicks_all")]
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, token)| *token)
            .collect();
        f.fmt_line(&tokens.join(","))
    }
}

/// Custom metadata as a JSON object
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata(pub Map<String, Value>);

impl Header for Metadata {
    fn header_name() -> &'static str {
        "X-MC-Metadata"
    }

    fn parse_header(raw: &Raw) -> HyperResult<Metadata> {
        match serde_json::from_str(last_line(raw)?) {
            Ok(Value::Object(map)) => Ok(Metadata(map)),
            _ => Err(HyperError::Header),
        }
    }

    fn fmt_header(&self, f: &mut HeaderFormatter) -> FmtResult {
        f.fmt_line(&Value::Object(self.0.clone()))
    }
}

/// Whether a header is consumed as a directive rather than passed through
pub(crate) fn is_directive(name: &str) -> bool {
    [
        Tags::header_name(),
        Subaccount::header_name(),
        Important::header_name(),
        InlineCss::header_name(),
        AutoText::header_name(),
        PreserveRecipients::header_name(),
        Track::header_name(),
        Metadata::header_name(),
    ]
    .iter()
    .any(|directive| directive.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod test {
    use super::{is_directive, Important, Metadata, Subaccount, Tags, Track};
    use crate::header::Headers;
    use hyperx::header::{Header, Raw};
    use serde_json::json;

    fn raw(lines: &[&'static str]) -> Raw {
        let mut raw = Raw::from(lines[0]);
        for line in &lines[1..] {
            raw.push(*line);
        }
        raw
    }

    #[test]
    fn tags_split_and_trim() {
        assert_eq!(
            Tags::parse_header(&raw(&["foo, bar ,,baz"])).ok(),
            Some(Tags(vec!["foo".into(), "bar".into(), "baz".into()]))
        );
    }

    #[test]
    fn tags_from_repeated_headers() {
        assert_eq!(
            Tags::parse_header(&raw(&["foo", "bar,baz"])).ok(),
            Some(Tags(vec!["foo".into(), "bar".into(), "baz".into()]))
        );
    }

    #[test]
    fn tags_format() {
        let mut headers = Headers::new();
        headers.set(Tags(vec!["foo".into(), "bar".into()]));
        headers.set(Track { opens: true, clicks: false });

        assert_eq!(
            format!("{}", headers),
            "X-MC-Tags: foo,bar\r\nX-MC-Track: opens\r\n"
        );
    }

    #[test]
    fn flag_last_wins() {
        assert_eq!(
            Important::parse_header(&raw(&["false", "TRUE"])).ok(),
            Some(Important(true))
        );
        assert!(Important::parse_header(&raw(&["maybe"])).is_err());
    }

    #[test]
    fn subaccount_rejects_blank() {
        assert_eq!(
            Subaccount::parse_header(&raw(&[" customer-123 "])).ok(),
            Some(Subaccount("customer-123".into()))
        );
        assert!(Subaccount::parse_header(&raw(&["  "])).is_err());
    }

    #[test]
    fn track_tokens() {
        assert_eq!(
            Track::parse_header(&raw(&["opens,clicks_htmlonly"])).ok(),
            Some(Track {
                opens: true,
                clicks: true
            })
        );
        assert_eq!(
            Track::parse_header(&raw(&["Opens"])).ok(),
            Some(Track {
                opens: true,
                clicks: false
            })
        );
        assert!(Track::parse_header(&raw(&["opens,bounces"])).is_err());
    }

    #[test]
    fn metadata_object_only() {
        let meta = Metadata::parse_header(&raw(&[r#"{"user_id": 42}"#])).unwrap();
        assert_eq!(meta.0.get("user_id"), Some(&json!(42)));
        assert!(Metadata::parse_header(&raw(&["[1, 2]"])).is_err());
        assert!(Metadata::parse_header(&raw(&["{broken"])).is_err());
    }

    #[test]
    fn directive_names_match_any_case() {
        assert!(is_directive("x-mc-tags"));
        assert!(is_directive("X-MC-INLINECSS"));
        assert!(!is_directive("X-MC-Unknown"));
        assert!(!is_directive("Reply-To"));
    }
}
