// SPDX-License-Identifier: Apache-2.0

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

pub const ID_MAX_LEN: usize = 128;

fn check_id(input: &str, name: &'static str) -> Result<(), ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty(name));
    }
    if input.trim() != input {
        return Err(ParseError::Trimmed(name));
    }
    if input.len() > ID_MAX_LEN {
        return Err(ParseError::TooLong(name, ID_MAX_LEN));
    }
    Ok(())
}

/// Opaque document id of a product. Generated ids are UUID v4, but any
/// non-empty untrimmed string within the length cap is accepted so ids
/// minted elsewhere survive a round trip through the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        check_id(input, "product_id")?;
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        check_id(input, "user_id")?;
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_rejects_hidden_trimming() {
        assert!(ProductId::parse("p-1").is_ok());
        assert!(ProductId::parse(" p-1").is_err());
        assert!(ProductId::parse("p-1 ").is_err());
        assert!(ProductId::parse("").is_err());
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(ProductId::generate(), ProductId::generate());
    }

    #[test]
    fn user_id_length_cap() {
        let long = "u".repeat(ID_MAX_LEN + 1);
        assert_eq!(
            UserId::parse(&long),
            Err(ParseError::TooLong("user_id", ID_MAX_LEN))
        );
    }
}
