mod directive;
mod map;

pub use self::directive::*;
pub use self::map::{Headers, HeadersIter};
pub use hyperx::header::{Formatter as HeaderFormatter, Header, Raw};

use crate::error::{Result, TranslateError};
use std::str::from_utf8;

pub(crate) const REPLY_TO: &str = "Reply-To";

/// Decode every raw value of a header
///
/// Surrounding whitespace is trimmed from each value.
pub(crate) fn raw_values(name: &str, lines: &[Vec<u8>]) -> Result<Vec<String>> {
    lines
        .iter()
        .map(|line| {
            from_utf8(line)
                .map(|value| value.trim().to_owned())
                .map_err(|_| TranslateError::InvalidHeaderValue { name: name.into() })
        })
        .collect()
}

/// Render a raw header value for diagnostics, replacing broken UTF-8
pub(crate) fn raw_lossy(raw: &Raw) -> String {
    raw.iter()
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod test {
    use super::{raw_lossy, raw_values, Headers};
    use crate::error::TranslateError;

    #[test]
    fn repeated_values_keep_order() {
        let mut headers = Headers::new();
        headers.append_raw("X-Campaign", "spring ");
        headers.append_raw("x-campaign", " summer");

        let lines = headers.get_raw("X-CAMPAIGN").unwrap();
        assert_eq!(
            raw_values("X-Campaign", lines).unwrap(),
            vec!["spring".to_string(), "summer".to_string()]
        );
    }

    #[test]
    fn broken_utf8_is_reported() {
        let mut headers = Headers::new();
        headers.set_raw("X-Binary", vec![0xffu8, 0xfe]);

        let lines = headers.get_raw("X-Binary").unwrap();
        assert_eq!(
            raw_values("X-Binary", lines),
            Err(TranslateError::InvalidHeaderValue {
                name: "X-Binary".into()
            })
        );

        let raw = headers.to_raw("X-Binary").unwrap();
        assert_eq!(raw_lossy(&raw), "\u{fffd}\u{fffd}");
    }
}
