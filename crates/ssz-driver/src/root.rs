use std::fmt;
use std::str::FromStr;

use ssz_wire::Chunk;

/// A 32-byte hash-tree root. Displays as 64 lowercase hex digits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Root(pub Chunk);

impl Root {
    #[must_use]
    pub fn as_bytes(&self) -> &Chunk {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<Chunk> for Root {
    fn from(chunk: Chunk) -> Self {
        Root(chunk)
    }
}

impl From<Root> for Chunk {
    fn from(root: Root) -> Self {
        root.0
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Root({self})")
    }
}

impl FromStr for Root {
    type Err = hex::FromHexError;

    /// Parse 64 hex digits, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut out = [0u8; 32];
        hex::decode_to_slice(digits, &mut out)?;
        Ok(Root(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xAB;
        bytes[31] = 0x0F;
        let text = Root(bytes).to_string();
        assert_eq!(text.len(), 64);
        assert!(text.starts_with("ab00"));
        assert!(text.ends_with("0f"));
    }

    #[test]
    fn parse_roundtrip_with_prefix() {
        let root = Root([0x5A; 32]);
        assert_eq!(format!("0x{root}").parse::<Root>().unwrap(), root);
        assert_eq!(root.to_hex().parse::<Root>().unwrap(), root);
    }

    #[test]
    fn reject_wrong_length() {
        assert!("abcd".parse::<Root>().is_err());
    }
}
