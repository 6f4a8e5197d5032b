// SPDX-License-Identifier: Apache-2.0

use crate::{ParseError, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;

/// Per-review score, an integer between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(i64);

impl Rating {
    pub fn new(value: i64) -> Result<Self, ParseError> {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(ParseError::OutOfRange("rating", value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

/// The authenticated caller as handed to us by the identity provider.
/// This crate trusts the pair verbatim; it performs no authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reviewer {
    pub id: UserId,
    pub name: String,
}

/// One review embedded in a product document.
///
/// `name` is fixed at submission time and does not track later profile
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user: UserId,
    pub name: String,
    pub rating: Rating,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    #[must_use]
    pub fn new(reviewer: Reviewer, rating: Rating, comment: String, at: DateTime<Utc>) -> Self {
        Self {
            user: reviewer.id,
            name: reviewer.name,
            rating,
            comment,
            created_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_are_inclusive() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(5).is_ok());
        assert_eq!(Rating::new(0), Err(ParseError::OutOfRange("rating", 0)));
        assert_eq!(Rating::new(6), Err(ParseError::OutOfRange("rating", 6)));
        assert_eq!(Rating::new(-3), Err(ParseError::OutOfRange("rating", -3)));
    }

    #[test]
    fn review_snapshots_reviewer_name() {
        let reviewer = Reviewer {
            id: UserId::parse("u1").unwrap(),
            name: "Ada".to_string(),
        };
        let review = Review::new(
            reviewer,
            Rating::new(4).unwrap(),
            "solid".to_string(),
            Utc::now(),
        );
        assert_eq!(review.name, "Ada");
        assert_eq!(review.user.as_str(), "u1");
    }
}
