//! One physical LDIF line
//!
//! Two splitting conventions exist side by side: the clean transformer splits
//! on the first `:`, the bof transformer on the first `": "`. Both produce an
//! [`AttributeValue`] that remembers the raw text after the split so the
//! unclassified path can reproduce the input byte for byte.

/// How the value of an attribute is encoded on the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `attr: value`
    Plain,
    /// `attr:: base64`
    Base64,
}

/// Classification of a line that has already been stripped of surrounding whitespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment(&'a str),
    Pair(AttributeValue<'a>),
    /// Non-empty line with no `:` at all
    Bare(&'a str),
}

impl<'a> Line<'a> {
    pub fn parse(line: &'a str) -> Self {
        if line.is_empty() {
            Line::Blank
        } else if line.starts_with('#') {
            Line::Comment(line)
        } else {
            match AttributeValue::split_colon(line) {
                Some(pair) => Line::Pair(pair),
                None => Line::Bare(line),
            }
        }
    }
}

/// An `attribute<sep>value` pair borrowed from the input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeValue<'a> {
    /// Attribute token with any separator colons removed
    pub attribute: &'a str,
    pub encoding: Encoding,
    /// Everything after the split point, untouched
    pub raw: &'a str,
    /// The value with the base64 marker and surrounding whitespace removed
    pub value: &'a str,
}

impl<'a> AttributeValue<'a> {
    /// Split on the first `:`.
    ///
    /// `raw` keeps the second colon of a `::` separator and the space that
    /// follows it, so `attribute + ":" + raw` is the original line.
    pub fn split_colon(line: &'a str) -> Option<Self> {
        let (attribute, raw) = line.split_once(':')?;
        let (encoding, value) = match raw.strip_prefix(':') {
            Some(rest) => (Encoding::Base64, rest.trim()),
            None => (Encoding::Plain, raw.trim()),
        };
        Some(Self {
            attribute,
            encoding,
            raw,
            value,
        })
    }

    /// Split on the first `": "`.
    ///
    /// A token ending in `:` marks a base64 value; leading and trailing
    /// colons are then stripped from the attribute name.
    pub fn split_spaced(line: &'a str) -> Option<Self> {
        let (token, raw) = line.split_once(": ")?;
        let encoding = if token.ends_with(':') {
            Encoding::Base64
        } else {
            Encoding::Plain
        };
        Some(Self {
            attribute: token.trim_matches(':'),
            encoding,
            raw,
            value: raw.trim(),
        })
    }

    pub fn is_base64(&self) -> bool {
        self.encoding == Encoding::Base64
    }
}

/// Remove a trailing `\n` or `\r\n`
pub fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
