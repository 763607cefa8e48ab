//! Catalog logic for the Lumen lighting storefront.
//!
//! Everything here runs over a catalog already fetched from the storefront
//! API and held in memory:
//!
//! - **Catalog**: products, variations, attributes, images, prices
//! - **Facets**: option lists discovered from the catalog's attributes
//! - **Filter**: AND-across-facets, OR-across-variations matching
//! - **Recommend**: keyword-weighted ranking for the room/lighting/style quiz
//! - **Listing**: text search, sorting and pagination
//!
//! # Example
//!
//! ```rust
//! use lumen_catalog::prelude::*;
//! use rand::SeedableRng;
//!
//! let catalog = vec![
//!     Product::new("p1", "Kitchen Pendant LED")
//!         .with_variation(Variation::new("KP-1").with_attribute("Color", "Brass, Black")),
//! ];
//!
//! let options = FilterOptions::from_catalog(&catalog);
//! assert_eq!(options.options(&FacetKey::Color).unwrap(), &["All", "Black", "Brass"]);
//!
//! let query = RecommendQuery::new().with(RecommendFacet::RoomType, "Kitchen");
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let picks = Recommender::new().recommend(&catalog, &query, &mut rng);
//! assert_eq!(picks.items[0].product.name, "Kitchen Pendant LED");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod search;

pub use error::CatalogError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{parse_catalog, split_values, Attribute, Image, Product, Variation};

    // Search
    pub use crate::search::{
        FacetChoice, FacetKey, FacetOptions, FilterOptions, FilterSelection, Jitter, Listing,
        ListingQuery, Pagination, RecommendFacet, RecommendQuery, Recommendations, Recommender,
        ScoredProduct, SortOption,
    };
}
