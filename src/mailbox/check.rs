use super::MailboxError;
use idna::domain_to_ascii;
use lazy_static::lazy_static;
use regex::Regex;
use std::net::IpAddr;

lazy_static! {
    // https://html.spec.whatwg.org/multipage/forms.html#valid-e-mail-address
    // Quoted local parts are rejected.
    static ref USER_RE: Regex = Regex::new(r"^(?i)[a-z0-9.!#$%&'*+/=?^_`{|}~-]+\z").unwrap();
    static ref DOMAIN_RE: Regex = Regex::new(
        r"(?i)^[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?)*$"
    ).unwrap();
    // address literal, e.g. user@[127.0.0.1] (SMTP 4.1.3)
    static ref LITERAL_RE: Regex = Regex::new(r"(?i)^\[([a-f0-9:\.]+)\]\z").unwrap();
}

/// Check the local part of an address
pub fn check_user(user: &str) -> Result<(), MailboxError> {
    if USER_RE.is_match(user) {
        Ok(())
    } else {
        Err(MailboxError::InvalidUser(user.into()))
    }
}

/// Check the domain part of an address
///
/// Internationalized domains are accepted when their punycode form is valid.
pub fn check_domain(domain: &str) -> Result<(), MailboxError> {
    check_domain_ascii(domain).or_else(|_| {
        domain_to_ascii(domain)
            .map_err(|_| MailboxError::InvalidDomain(domain.into()))
            .and_then(|ascii| check_domain_ascii(&ascii))
            .map_err(|_| MailboxError::InvalidDomain(domain.into()))
    })
}

fn check_domain_ascii(domain: &str) -> Result<(), MailboxError> {
    if DOMAIN_RE.is_match(domain) {
        return Ok(());
    }

    let is_ip_literal = LITERAL_RE
        .captures(domain)
        .and_then(|caps| caps.get(1))
        .map(|ip| ip.as_str().parse::<IpAddr>().is_ok())
        .unwrap_or(false);

    if is_ip_literal {
        Ok(())
    } else {
        Err(MailboxError::InvalidDomain(domain.into()))
    }
}
