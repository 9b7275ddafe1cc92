//! `.properties` file loading.
//!
//! Parsing follows `java.util.Properties` and is done by `java-properties`.
//! Files are decoded as UTF-8, falling back to ISO-8859-1 when the bytes are
//! not valid UTF-8.

use std::{borrow::Cow, collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, anyhow};
use encoding_rs::{UTF_8, WINDOWS_1252};
use java_properties::PropertiesIter;

/// A key-value table loaded from a properties file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Parse properties from text. Later duplicates of a key win.
    pub fn parse(content: &str) -> Result<Self> {
        let content = join_surrogate_escapes(content);
        let mut entries = HashMap::new();

        PropertiesIter::new_with_encoding(content.as_bytes(), UTF_8)
            .read_into(|key, value| {
                entries.insert(key, value);
            })
            .map_err(|e| anyhow!("{e}"))?;

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Load a properties file from disk.
pub fn load_properties(path: &Path) -> Result<Properties> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read properties file: {}", path.display()))?;
    Properties::parse(&decode(&bytes))
        .with_context(|| format!("Failed to parse properties file: {}", path.display()))
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

/// Replace `\uD8xx\uDCxx` escape pairs with the character they encode.
///
/// The reader decodes `\uXXXX` one UTF-16 unit at a time and rejects lone
/// surrogates, so pairs are joined before parsing. Escaped backslashes are
/// skipped as a unit and never start an escape.
fn join_surrogate_escapes(text: &str) -> Cow<'_, str> {
    if !text.contains("\\u") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let escape = &rest[pos..];
        if let Some(c) = surrogate_pair(escape) {
            out.push(c);
            rest = &escape[12..];
        } else {
            let len = 1 + escape[1..].chars().next().map_or(0, char::len_utf8);
            out.push_str(&escape[..len]);
            rest = &escape[len..];
        }
    }
    out.push_str(rest);

    Cow::Owned(out)
}

fn surrogate_pair(escape: &str) -> Option<char> {
    let unit = |raw: Option<&str>| -> Option<u16> {
        let hex = raw?.strip_prefix("\\u")?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u16::from_str_radix(hex, 16).ok()
    };
    let high = unit(escape.get(..6))?;
    let low = unit(escape.get(6..12))?;
    if !(0xD800..0xDC00).contains(&high) || !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    char::decode_utf16([high, low]).next()?.ok()
}
