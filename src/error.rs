use thiserror::Error;

/// Reasons a message cannot be translated into a payload
///
/// These are contract violations of the composed message. Everything else,
/// like empty bodies or odd addresses, translates fine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslateError {
    /// The message has no `From` mailbox
    #[error("message has no sender")]
    MissingSender,

    /// A header value is not valid UTF-8
    #[error("value of header {name} is not valid UTF-8")]
    InvalidHeaderValue { name: String },

    /// An `X-MC-*` directive value does not follow its grammar
    #[error("invalid {name} directive: {value:?}")]
    InvalidDirective { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, TranslateError>;
