use serde::{Deserialize, Serialize};

/// How repeated values of a header are folded into the single value
/// the payload allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderCollapse {
    /// Join all values in order with `", "`
    Join,

    /// Keep the last value only
    LastWins,
}

impl Default for HeaderCollapse {
    fn default() -> Self {
        HeaderCollapse::Join
    }
}

impl HeaderCollapse {
    /// Fold values into one, `None` when there are no values
    pub fn collapse(self, values: Vec<String>) -> Option<String> {
        match self {
            _ if values.is_empty() => None,
            HeaderCollapse::Join => Some(values.join(", ")),
            HeaderCollapse::LastWins => values.into_iter().last(),
        }
    }
}

/// Which source fills the `Reply-To` header when the message carries both
/// reply-to mailboxes and a literal `Reply-To` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyToPolicy {
    /// Reply-to mailboxes replace the literal header
    PreferStructured,

    /// The literal header replaces reply-to mailboxes
    PreferLiteral,

    /// Literal values first, then reply-to mailboxes
    Merge,
}

impl Default for ReplyToPolicy {
    fn default() -> Self {
        ReplyToPolicy::PreferStructured
    }
}

/// Translator settings
///
/// Missing fields take their defaults when deserialized, so an empty
/// object is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub header_collapse: HeaderCollapse,
    pub reply_to: ReplyToPolicy,
}

impl TranslatorConfig {
    #[inline]
    pub fn new() -> Self {
        TranslatorConfig::default()
    }

    /// Set the collapse policy and move the config.
    #[inline]
    pub fn with_header_collapse(mut self, policy: HeaderCollapse) -> Self {
        self.header_collapse = policy;
        self
    }

    /// Set the Reply-To policy and move the config.
    #[inline]
    pub fn with_reply_to(mut self, policy: ReplyToPolicy) -> Self {
        self.reply_to = policy;
        self
    }
}

#[cfg(test)]
mod test {
    use super::{HeaderCollapse, ReplyToPolicy, TranslatorConfig};

    fn values(list: &[&str]) -> Vec<String> {
        list.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn collapse_join() {
        assert_eq!(
            HeaderCollapse::Join.collapse(values(&["a", "b"])),
            Some("a, b".into())
        );
        assert_eq!(HeaderCollapse::Join.collapse(vec![]), None);
    }

    #[test]
    fn collapse_last_wins() {
        assert_eq!(
            HeaderCollapse::LastWins.collapse(values(&["a", "b"])),
            Some("b".into())
        );
        assert_eq!(HeaderCollapse::LastWins.collapse(vec![]), None);
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: TranslatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TranslatorConfig::default());

        let config: TranslatorConfig =
            serde_json::from_str(r#"{"header_collapse": "last_wins", "reply_to": "merge"}"#)
                .unwrap();
        assert_eq!(
            config,
            TranslatorConfig::new()
                .with_header_collapse(HeaderCollapse::LastWins)
                .with_reply_to(ReplyToPolicy::Merge)
        );
    }

    #[test]
    fn deserialize_rejects_unknown_policy() {
        assert!(serde_json::from_str::<TranslatorConfig>(r#"{"reply_to": "random"}"#).is_err());
    }
}
