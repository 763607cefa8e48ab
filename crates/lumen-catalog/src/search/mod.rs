//! Search module.
//!
//! Facet discovery, facet filtering, keyword-weighted recommendations and
//! paginated listings over an in-memory catalog.

mod facets;
mod filter;
mod keywords;
mod listing;
mod recommend;
mod results;

pub use facets::{AttributeKind, FacetKey, FacetOptions, FilterOptions, ALL, ATTRIBUTE_PREFIX};
pub use filter::{FacetChoice, FilterSelection};
pub use keywords::{keywords_for, values_for};
pub use listing::{ListingQuery, SortOption};
pub use recommend::{
    FacetMatch, Jitter, RecommendFacet, RecommendQuery, Recommendations, Recommender,
    Relevance, ScoredProduct, BONUS_KEYWORDS, CURATED_SIZE, RESULT_LIMIT,
};
pub use results::{Listing, Pagination};
