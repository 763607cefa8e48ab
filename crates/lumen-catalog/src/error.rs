//! Catalog error types.

use thiserror::Error;

/// Errors raised at the edges of the catalog: parsing input and naming
/// facets. Scoring and filtering themselves never fail.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog payload could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A facet name that matches no known facet.
    #[error("Unknown facet: {0}")]
    UnknownFacet(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}
