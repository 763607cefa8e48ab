//! Facet selections and the product matching contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{split_values, Product, Variation};
use crate::search::facets::{FacetKey, ALL};

/// The value chosen for one facet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FacetChoice {
    /// No constraint.
    #[default]
    All,
    /// A concrete value.
    Value(String),
}

impl FacetChoice {
    /// Parse a raw UI value. `"All"` (any case) and blank strings mean no
    /// constraint.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(ALL) {
            FacetChoice::All
        } else {
            FacetChoice::Value(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FacetChoice::All)
    }

    /// The concrete value, if constrained.
    pub fn value(&self) -> Option<&str> {
        match self {
            FacetChoice::All => None,
            FacetChoice::Value(value) => Some(value),
        }
    }
}

impl From<String> for FacetChoice {
    fn from(raw: String) -> Self {
        FacetChoice::parse(&raw)
    }
}

impl From<&str> for FacetChoice {
    fn from(raw: &str) -> Self {
        FacetChoice::parse(raw)
    }
}

impl From<FacetChoice> for String {
    fn from(choice: FacetChoice) -> Self {
        match choice {
            FacetChoice::All => ALL.to_string(),
            FacetChoice::Value(value) => value,
        }
    }
}

/// Current choice per facet.
///
/// A product matches when it satisfies every constrained facet (AND), and it
/// satisfies a facet when any one of its variations carries the value (OR).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSelection {
    choices: BTreeMap<FacetKey, FacetChoice>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a facet and return the selection.
    pub fn with(mut self, key: FacetKey, choice: impl Into<FacetChoice>) -> Self {
        self.set(key, choice);
        self
    }

    /// Set a facet. Choosing "All" clears it.
    pub fn set(&mut self, key: FacetKey, choice: impl Into<FacetChoice>) {
        match choice.into() {
            FacetChoice::All => {
                self.choices.remove(&key);
            }
            choice => {
                self.choices.insert(key, choice);
            }
        }
    }

    /// The choice for a facet; unset facets read as "All".
    pub fn get(&self, key: &FacetKey) -> &FacetChoice {
        const UNSET: &FacetChoice = &FacetChoice::All;
        self.choices.get(key).unwrap_or(UNSET)
    }

    /// Constrained facets and their values.
    pub fn active(&self) -> impl Iterator<Item = (&FacetKey, &str)> {
        self.choices
            .iter()
            .filter_map(|(key, choice)| choice.value().map(|value| (key, value)))
    }

    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }

    /// Whether a product satisfies every constrained facet.
    pub fn matches(&self, product: &Product) -> bool {
        self.active().all(|(key, value)| {
            let target = value.to_lowercase();
            product
                .variations
                .iter()
                .any(|variation| variation_has(variation, key, &target))
        })
    }

    /// Matching products, in catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let matched: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();
        tracing::debug!(
            facets = self.choices.len(),
            matched = matched.len(),
            of = products.len(),
            "applied facet filter"
        );
        matched
    }
}

/// `target` must already be lowercase.
fn variation_has(variation: &Variation, key: &FacetKey, target: &str) -> bool {
    let contains = |raw: &str| split_values(raw).any(|token| token.to_lowercase() == target);

    match key {
        FacetKey::Application => contains(&variation.usecase),
        _ => variation
            .attributes
            .iter()
            .filter(|attribute| key.accepts_attribute(&attribute.name))
            .any(|attribute| contains(&attribute.value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Pendant")
                .with_variation(
                    Variation::new("P1-A")
                        .with_usecase("Kitchen, Dining")
                        .with_attribute("Color", "Black"),
                )
                .with_variation(
                    Variation::new("P1-B")
                        .with_usecase("Kitchen")
                        .with_attribute("Colour", "Brass, White")
                        .with_attribute("Wattage", "60W"),
                ),
            Product::new("p2", "Desk Lamp").with_variation(
                Variation::new("P2-A")
                    .with_usecase("Office, Task")
                    .with_attribute("Color", "White")
                    .with_attribute("Finish", "Matte"),
            ),
            Product::new("p3", "Bare"),
        ]
    }

    fn ids<'a>(products: &[&'a Product]) -> Vec<&'a str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(FacetChoice::parse("All"), FacetChoice::All);
        assert_eq!(FacetChoice::parse("all"), FacetChoice::All);
        assert_eq!(FacetChoice::parse("  "), FacetChoice::All);
        assert_eq!(FacetChoice::parse(" Red "), FacetChoice::Value("Red".into()));
    }

    #[test]
    fn test_unconstrained_matches_everything() {
        let products = catalog();
        let selection = FilterSelection::new().with(FacetKey::Color, "All");
        assert!(selection.is_unconstrained());
        assert_eq!(selection.apply(&products).len(), 3);
    }

    #[test]
    fn test_or_across_variations() {
        let products = catalog();
        let selection = FilterSelection::new().with(FacetKey::Color, "brass");
        assert_eq!(ids(&selection.apply(&products)), vec!["p1"]);
    }

    #[test]
    fn test_and_across_facets() {
        let products = catalog();

        let white_kitchen = FilterSelection::new()
            .with(FacetKey::Color, "White")
            .with(FacetKey::Application, "Kitchen");
        assert_eq!(ids(&white_kitchen.apply(&products)), vec!["p1"]);

        let white_task = FilterSelection::new()
            .with(FacetKey::Color, "White")
            .with(FacetKey::Application, "task");
        assert_eq!(ids(&white_task.apply(&products)), vec!["p2"]);

        let impossible = FilterSelection::new()
            .with(FacetKey::Wattage, "60W")
            .with(FacetKey::Application, "Office");
        assert!(impossible.apply(&products).is_empty());
    }

    #[test]
    fn test_exact_token_not_substring() {
        let products = catalog();
        let selection = FilterSelection::new().with(FacetKey::Color, "Whit");
        assert!(selection.apply(&products).is_empty());
    }

    #[test]
    fn test_dynamic_attribute_facet() {
        let products = catalog();
        let selection = FilterSelection::new().with(FacetKey::Attribute("finish".into()), "matte");
        assert_eq!(ids(&selection.apply(&products)), vec!["p2"]);
    }

    #[test]
    fn test_attribute_spellings_share_one_entry() {
        let products = catalog();
        let selection = FilterSelection::new()
            .with(FacetKey::Attribute("Finish".into()), "Gloss")
            .with(FacetKey::Attribute("finish".into()), "Matte");

        assert_eq!(selection.active().count(), 1);
        assert_eq!(selection.get(&FacetKey::Attribute("FINISH".into())).value(), Some("Matte"));
        assert_eq!(ids(&selection.apply(&products)), vec!["p2"]);
    }

    #[test]
    fn test_zero_variations_never_match_active_facet() {
        let bare = Product::new("p3", "Bare");
        let selection = FilterSelection::new().with(FacetKey::Application, "Kitchen");
        assert!(!selection.matches(&bare));
    }

    #[test]
    fn test_set_all_clears() {
        let mut selection = FilterSelection::new().with(FacetKey::Color, "Red");
        assert_eq!(selection.get(&FacetKey::Color).value(), Some("Red"));
        selection.set(FacetKey::Color, FacetChoice::All);
        assert!(selection.get(&FacetKey::Color).is_all());
        assert!(selection.is_unconstrained());
    }

    #[test]
    fn test_selection_json_shape() {
        let selection = FilterSelection::new()
            .with(FacetKey::Color, "Red")
            .with(FacetKey::Attribute("Finish".into()), "Matte");
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"color":"Red","Finish":"Matte"}"#);

        let back: FilterSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selection);
    }
}
