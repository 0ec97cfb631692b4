use super::check::{check_domain, check_user};
use std::fmt::{Display, Formatter, Result as FmtResult, Write};
use std::slice::Iter;
use std::str::FromStr;
use thiserror::Error;

/// Email address
///
/// This type keeps the address in canonical form (_user@domain.tld_).
///
/// Parsing with [`FromStr`] checks the syntax of both parts, while
/// [`Address::new`] takes the parts as they are.
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Address {
    /// User part
    pub user: String,

    /// Domain part
    pub domain: String,
}

impl Address {
    /// Create email address from parts without checking them
    #[inline]
    pub fn new<U: Into<String>, D: Into<String>>(user: U, domain: D) -> Self {
        Address {
            user: user.into(),
            domain: domain.into(),
        }
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.user)?;
        f.write_char('@')?;
        f.write_str(&self.domain)
    }
}

impl FromStr for Address {
    type Err = MailboxError;

    fn from_str(val: &str) -> Result<Self, MailboxError> {
        let mut parts = val.rsplitn(2, '@');
        let domain = parts.next().unwrap_or_default();
        let user = parts.next().ok_or(MailboxError::MissingParts)?;

        check_user(user)?;
        check_domain(domain)?;

        Ok(Address::new(user, domain))
    }
}

/// Email address with optional addressee name
///
/// Formats as _Some Name \<user@domain.tld\>_ or _withoutname@domain.tld_.
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub struct Mailbox {
    /// User name part
    pub name: Option<String>,

    /// Email address part
    pub email: Address,
}

impl Mailbox {
    /// Create new mailbox using email address and addressee name
    #[inline]
    pub fn new(name: Option<String>, email: Address) -> Self {
        Mailbox { name, email }
    }

    /// Addressee name without surrounding whitespace
    ///
    /// Blank names are treated as missing.
    pub fn display_name(&self) -> Option<&str> {
        self.name
            .as_ref()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(name) = self.display_name() {
            if name.contains(|c: char| SPECIALS.contains(c)) {
                f.write_char('"')?;
                for c in name.chars() {
                    if c == '"' || c == '\\' {
                        f.write_char('\\')?;
                    }
                    f.write_char(c)?;
                }
                f.write_char('"')?;
            } else {
                f.write_str(name)?;
            }
            f.write_str(" <")?;
            self.email.fmt(f)?;
            return f.write_char('>');
        }
        self.email.fmt(f)
    }
}

impl FromStr for Mailbox {
    type Err = MailboxError;

    fn from_str(src: &str) -> Result<Mailbox, Self::Err> {
        match (src.find('<'), src.find('>')) {
            (Some(open), Some(close)) if open < close => {
                let name = unquote(src[..open].trim());
                let email = src[open + 1..close].parse()?;
                let name = if name.is_empty() { None } else { Some(name) };
                Ok(Mailbox::new(name, email))
            }
            (Some(_), _) | (None, Some(_)) => Err(MailboxError::Unbalanced),
            _ => Ok(Mailbox::new(None, src.trim().parse()?)),
        }
    }
}

impl<N, E> From<(E, N)> for Mailbox
where
    N: Into<String>,
    E: Into<String>,
{
    /// Build a mailbox from an `(email, name)` pair
    ///
    /// The email is split at the last `@` and kept unchecked.
    fn from((email, name): (E, N)) -> Self {
        let email = email.into();
        let email = match email.rfind('@') {
            Some(at) => Address::new(&email[..at], &email[at + 1..]),
            None => Address::new(email, ""),
        };
        Mailbox::new(Some(name.into()), email)
    }
}

/// List of mailboxes
///
/// Formats as _Some Name \<user@domain.tld\>, withoutname@domain.tld, ..._.
#[derive(Debug, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Default)]
pub struct Mailboxes(Vec<Mailbox>);

impl Mailboxes {
    /// Create empty mailboxes list
    #[inline]
    pub fn new() -> Self {
        Mailboxes(Vec::new())
    }

    /// Add mailbox to a list
    ///
    /// Useful for the "builder-style" pattern.
    #[inline]
    pub fn with(mut self, mbox: Mailbox) -> Self {
        self.0.push(mbox);
        self
    }

    /// Add mailbox to a list
    #[inline]
    pub fn push(&mut self, mbox: Mailbox) {
        self.0.push(mbox);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over mailboxes
    #[inline]
    pub fn iter(&self) -> Iter<'_, Mailbox> {
        self.0.iter()
    }
}

impl From<Mailbox> for Mailboxes {
    fn from(single: Mailbox) -> Self {
        Mailboxes(vec![single])
    }
}

impl From<Vec<Mailbox>> for Mailboxes {
    fn from(list: Vec<Mailbox>) -> Self {
        Mailboxes(list)
    }
}

impl From<Mailboxes> for Vec<Mailbox> {
    fn from(list: Mailboxes) -> Self {
        list.0
    }
}

impl IntoIterator for Mailboxes {
    type Item = Mailbox;
    type IntoIter = ::std::vec::IntoIter<Mailbox>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Mailboxes {
    type Item = &'a Mailbox;
    type IntoIter = Iter<'a, Mailbox>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Extend<Mailbox> for Mailboxes {
    fn extend<T: IntoIterator<Item = Mailbox>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl Display for Mailboxes {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut iter = self.iter();

        if let Some(mbox) = iter.next() {
            mbox.fmt(f)?;

            for mbox in iter {
                f.write_str(", ")?;
                mbox.fmt(f)?;
            }
        }

        Ok(())
    }
}

/// Parse a comma-separated address list
///
/// Commas inside quoted names and angle brackets do not split the list.
impl FromStr for Mailboxes {
    type Err = MailboxError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        split_list(src)
            .into_iter()
            .map(|m| m.trim().parse())
            .collect::<Result<Vec<_>, _>>()
            .map(Mailboxes)
    }
}

/// Characters which force a display name into quotes
const SPECIALS: &str = ",;:<>\"\\";

/// Strip surrounding quotes from a display name, resolving escapes
fn unquote(name: &str) -> String {
    if name.len() < 2 || !name.starts_with('"') || !name.ends_with('"') {
        return name.into();
    }
    let mut out = String::with_capacity(name.len());
    let mut escaped = false;
    for c in name[1..name.len() - 1].chars() {
        if escaped || c != '\\' {
            out.push(c);
            escaped = false;
        } else {
            escaped = true;
        }
    }
    out
}

/// Split an address list at commas outside quoted names and angle brackets
fn split_list(src: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;
    let mut angle = false;

    for (index, c) in src.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if quoted => escaped = true,
            '"' if !angle => quoted = !quoted,
            '<' if !quoted => angle = true,
            '>' if !quoted => angle = false,
            ',' if !quoted && !angle => {
                items.push(&src[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    items.push(&src[start..]);
    items
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MailboxError {
    #[error("missing domain or user")]
    MissingParts,
    #[error("unbalanced angle bracket")]
    Unbalanced,
    #[error("invalid email user: {0}")]
    InvalidUser(String),
    #[error("invalid email domain: {0}")]
    InvalidDomain(String),
}

#[cfg(test)]
mod test {
    use super::{Address, Mailbox, MailboxError, Mailboxes};

    #[test]
    fn format_address_only() {
        let mbox = Mailbox::new(None, Address::new("to", "example.com"));
        assert_eq!(format!("{}", mbox), "to@example.com");
    }

    #[test]
    fn format_address_with_name() {
        let mbox = Mailbox::new(Some("To Name".into()), Address::new("to", "example.com"));
        assert_eq!(format!("{}", mbox), "To Name <to@example.com>");
    }

    #[test]
    fn format_blank_name_as_address() {
        let mbox = Mailbox::new(Some("  ".into()), Address::new("to", "example.com"));
        assert_eq!(mbox.display_name(), None);
        assert_eq!(format!("{}", mbox), "to@example.com");
    }

    #[test]
    fn parse_address_with_name() {
        assert_eq!(
            "CC 1 Name <cc-1@example.com>".parse(),
            Ok(Mailbox::new(
                Some("CC 1 Name".into()),
                Address::new("cc-1", "example.com")
            ))
        );
    }

    #[test]
    fn parse_address_with_empty_name() {
        assert_eq!(
            " <bcc-1@example.com>".parse(),
            Ok(Mailbox::new(None, Address::new("bcc-1", "example.com")))
        );
    }

    #[test]
    fn parse_rejects_broken_input() {
        assert_eq!(
            "Name <to@example.com".parse::<Mailbox>(),
            Err(MailboxError::Unbalanced)
        );
        assert_eq!(
            "example.com".parse::<Mailbox>(),
            Err(MailboxError::MissingParts)
        );
        assert_eq!(
            "to name@example.com".parse::<Mailbox>(),
            Err(MailboxError::InvalidUser("to name".into()))
        );
    }

    #[test]
    fn from_pair_keeps_address_unchecked() {
        let mbox: Mailbox = ("", "Nobody").into();
        assert_eq!(mbox.email, Address::new("", ""));
        assert_eq!(mbox.display_name(), Some("Nobody"));

        let mbox: Mailbox = ("reply-to@example.com", "Reply To Name").into();
        assert_eq!(mbox.email, Address::new("reply-to", "example.com"));
    }

    #[test]
    fn mailboxes_round_trip_text() {
        let list: Mailboxes = "cc-1@example.com, CC 2 Name <cc-2@example.com>"
            .parse()
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(
            format!("{}", list),
            "cc-1@example.com, CC 2 Name <cc-2@example.com>"
        );
    }

    #[test]
    fn parse_quoted_name() {
        assert_eq!(
            r#""Doe, \"JD\" John" <j@example.com>"#.parse(),
            Ok(Mailbox::new(
                Some(r#"Doe, "JD" John"#.into()),
                Address::new("j", "example.com")
            ))
        );
    }

    #[test]
    fn mailboxes_keep_commas_in_names() {
        let list: Mailboxes = r#""Doe, John" <j@example.com>, other@example.com"#
            .parse()
            .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(
            list.iter().map(|m| m.display_name()).collect::<Vec<_>>(),
            vec![Some("Doe, John"), None]
        );
        assert_eq!(
            format!("{}", list),
            r#""Doe, John" <j@example.com>, other@example.com"#
        );
        assert_eq!(format!("{}", list).parse(), Ok(list));
    }

    #[test]
    fn mailboxes_reject_empty_items() {
        assert_eq!(
            "a@example.com,,b@example.com".parse::<Mailboxes>(),
            Err(MailboxError::MissingParts)
        );
    }
}
