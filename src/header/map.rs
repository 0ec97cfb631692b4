use hyperx::header::{Header, Headers as TypedHeaders, Raw};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::slice::Iter;

/// Ordered header list of a message
///
/// Names compare case-insensitively and keep the casing of their first
/// insertion. Every name holds its raw values in insertion order, so
/// repeated headers are kept apart until the translator folds them.
///
/// Typed headers are formatted and parsed with hyperx on the way in and out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, Vec<Vec<u8>>)>,
}

impl Headers {
    #[inline]
    pub fn new() -> Self {
        Headers::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(entry, _)| entry.eq_ignore_ascii_case(name))
    }

    /// Append a raw value after the existing values of the same name
    pub fn append_raw<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let name = name.into();
        match self.position(&name) {
            Some(index) => self.entries[index].1.push(value.into()),
            None => self.entries.push((name, vec![value.into()])),
        }
    }

    /// Replace all values of a name with a single raw value
    pub fn set_raw<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        self.set_lines(name.into(), vec![value.into()]);
    }

    fn set_lines(&mut self, name: String, lines: Vec<Vec<u8>>) {
        match self.position(&name) {
            Some(index) => self.entries[index].1 = lines,
            None => self.entries.push((name, lines)),
        }
    }

    /// Set a typed header, replacing values of the same name
    pub fn set<H: Header>(&mut self, header: H) {
        let mut typed = TypedHeaders::new();
        typed.set(header);
        let lines = typed
            .get_raw(H::header_name())
            .map(|raw| raw.iter().map(<[u8]>::to_vec).collect())
            .unwrap_or_default();
        self.set_lines(H::header_name().into(), lines);
    }

    /// Parse a typed header, `None` when it is absent or malformed
    pub fn get<H: Header>(&self) -> Option<H> {
        self.to_raw(H::header_name())
            .and_then(|raw| H::parse_header(&raw).ok())
    }

    /// Raw values of a name, in insertion order
    pub fn get_raw(&self, name: &str) -> Option<&[Vec<u8>]> {
        self.position(name)
            .map(|index| self.entries[index].1.as_slice())
    }

    /// Raw values of a name gathered for hyperx parsing
    pub fn to_raw(&self, name: &str) -> Option<Raw> {
        let mut lines = self.get_raw(name)?.iter().cloned();
        let mut raw = Raw::from(lines.next()?);
        for line in lines {
            raw.push(line);
        }
        Some(raw)
    }

    pub fn remove(&mut self, name: &str) {
        if let Some(index) = self.position(name) {
            self.entries.remove(index);
        }
    }

    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over names with their raw values
    #[inline]
    pub fn iter(&self) -> HeadersIter<'_> {
        HeadersIter(self.entries.iter())
    }
}

pub struct HeadersIter<'a>(Iter<'a, (String, Vec<Vec<u8>>)>);

impl<'a> Iterator for HeadersIter<'a> {
    type Item = (&'a str, &'a [Vec<u8>]);

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|(name, lines)| (name.as_str(), lines.as_slice()))
    }
}

impl Display for Headers {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (name, lines) in self.iter() {
            for line in lines {
                write!(f, "{}: {}\r\n", name, String::from_utf8_lossy(line))?;
            }
        }
        Ok(())
    }
}
