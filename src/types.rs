//! Core types: Symbol.

use std::fmt;

/// Ticker symbol, stored inline as up to 8 ASCII bytes (zero-padded).
///
/// `Copy` and 8 bytes wide, so symbol-keyed maps and order lists never
/// allocate. Construction truncates anything longer than 8 bytes; callers
/// that accept untrusted input should validate length first (the portfolio
/// file loader does).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol([u8; 8]);

impl Symbol {
    pub const MAX_LEN: usize = 8;

    /// Create a symbol from a string. Bytes beyond [`Symbol::MAX_LEN`] are dropped.
    pub fn new(s: &str) -> Self {
        let mut buf = [0u8; Self::MAX_LEN];
        let bytes = s.as_bytes();
        let len = bytes.len().min(Self::MAX_LEN);
        buf[..len].copy_from_slice(&bytes[..len]);
        Symbol(buf)
    }

    /// The symbol as a string slice (without zero padding).
    pub fn as_str(&self) -> &str {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(Self::MAX_LEN);
        // Constructed from a &str prefix, so this is always valid UTF-8
        std::str::from_utf8(&self.0[..len]).unwrap_or("")
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.as_str())
    }
}

impl serde::Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Symbol {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.len() > Self::MAX_LEN {
            return Err(serde::de::Error::custom(format!(
                "symbol '{s}' exceeds {} bytes",
                Self::MAX_LEN
            )));
        }
        Ok(Symbol::new(&s))
    }
}
