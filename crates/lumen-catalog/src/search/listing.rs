//! Browsing the catalog: text search, facet filter, sort and paging.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::filter::FilterSelection;
use crate::search::results::{Listing, Pagination};

const DEFAULT_PER_PAGE: usize = 24;
const MAX_PER_PAGE: usize = 100;

/// Sort options for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Catalog order.
    #[default]
    Featured,
    NameAsc,
    NameDesc,
    /// Lowest variation price first; unpriced products last.
    PriceAsc,
    /// Highest lowest-variation price first; unpriced products last.
    PriceDesc,
}

impl SortOption {
    pub fn from_str(s: &str) -> Self {
        match s {
            "name_asc" => Self::NameAsc,
            "name_desc" => Self::NameDesc,
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            _ => Self::Featured,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::NameAsc => "Name: A-Z",
            Self::NameDesc => "Name: Z-A",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured => Ordering::Equal,
            Self::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            Self::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
            Self::PriceAsc | Self::PriceDesc => {
                let a = a.min_price().map(|m| m.amount_cents);
                let b = b.min_price().map(|m| m.amount_cents);
                match (a, b) {
                    (Some(a), Some(b)) if *self == Self::PriceAsc => a.cmp(&b),
                    (Some(a), Some(b)) => b.cmp(&a),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        }
    }
}

/// A catalog listing request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingQuery {
    /// Case-insensitive text matched against name and description.
    pub text: Option<String>,
    pub selection: FilterSelection,
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: usize,
    pub per_page: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingQuery {
    pub fn new() -> Self {
        Self {
            text: None,
            selection: FilterSelection::new(),
            sort: SortOption::Featured,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Set the text query. Blank text is ignored.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let text = text.trim();
        self.text = (!text.is_empty()).then(|| text.to_string());
        self
    }

    pub fn with_selection(mut self, selection: FilterSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination, clamping to a valid page and page size.
    pub fn with_pagination(mut self, page: usize, per_page: usize) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self
    }

    fn matches_text(&self, product: &Product) -> bool {
        match &self.text {
            None => true,
            Some(text) => {
                let needle = text.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
        }
    }

    /// Run the query over a catalog.
    pub fn run<'a>(&self, products: &'a [Product]) -> Listing<'a> {
        let mut matched: Vec<&'a Product> = self
            .selection
            .apply(products)
            .into_iter()
            .filter(|product| self.matches_text(product))
            .collect();

        matched.sort_by(|a, b| self.sort.compare(a, b));

        let pagination = Pagination::new(self.page, self.per_page, matched.len());
        let items = matched
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.per_page)
            .collect();

        Listing { items, pagination }
    }
}
