use mercata_store::StoreError;
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
#[non_exhaustive]
pub enum CatalogError {
    /// Referenced product does not exist.
    NotFound,
    /// The reviewer already has a review on this product.
    DuplicateReview,
    /// Underlying persistence failure, surfaced unmodified.
    Store(StoreError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("product not found"),
            Self::DuplicateReview => f.write_str("product already reviewed"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
