//! Facet keys and runtime discovery of filter options.
//!
//! The catalog has no fixed attribute schema, so the options a shopper can
//! filter by are discovered by scanning every variation.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// Sentinel option meaning "no constraint".
pub const ALL: &str = "All";

/// Attributes with a dedicated facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKind {
    Wattage,
    Color,
}

/// Attribute name aliases, lowercase, mapped to their canonical facet.
const ATTRIBUTE_ALIASES: &[(&str, AttributeKind)] = &[
    ("wattage", AttributeKind::Wattage),
    ("watt", AttributeKind::Wattage),
    ("watts", AttributeKind::Wattage),
    ("power", AttributeKind::Wattage),
    ("color", AttributeKind::Color),
    ("colour", AttributeKind::Color),
    ("colors", AttributeKind::Color),
    ("colours", AttributeKind::Color),
];

impl AttributeKind {
    /// Resolve an attribute name through the alias table.
    pub fn for_attribute(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        ATTRIBUTE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == name)
            .map(|(_, kind)| *kind)
    }
}

/// Written before a dynamic attribute name that would otherwise parse as a
/// fixed facet, e.g. `attribute:Usecase`.
pub const ATTRIBUTE_PREFIX: &str = "attribute:";

/// A filter dimension.
///
/// Dynamic attribute keys compare by trimmed, lowercased name, so `Finish`
/// and `finish` are the same facet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum FacetKey {
    /// Usecase tags ("applications").
    Application,
    /// Wattage attribute and its aliases.
    Wattage,
    /// Color attribute and its aliases.
    Color,
    /// Any other attribute, discovered at runtime. Holds the attribute name.
    Attribute(String),
}

impl FacetKey {
    /// The facet an attribute with this name belongs to.
    pub fn for_attribute(name: &str) -> Self {
        match AttributeKind::for_attribute(name) {
            Some(kind) => kind.into(),
            None => FacetKey::Attribute(name.trim().to_string()),
        }
    }

    /// Whether an attribute named `name` feeds this facet.
    pub fn accepts_attribute(&self, name: &str) -> bool {
        match self {
            FacetKey::Application => false,
            FacetKey::Wattage => AttributeKind::for_attribute(name) == Some(AttributeKind::Wattage),
            FacetKey::Color => AttributeKind::for_attribute(name) == Some(AttributeKind::Color),
            FacetKey::Attribute(own) => {
                AttributeKind::for_attribute(name).is_none()
                    && own.trim().to_lowercase() == name.trim().to_lowercase()
            }
        }
    }

    fn parse_key(s: &str) -> Self {
        let trimmed = s.trim();
        let prefixed = trimmed
            .get(..ATTRIBUTE_PREFIX.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(ATTRIBUTE_PREFIX));
        if prefixed {
            let name = trimmed[ATTRIBUTE_PREFIX.len()..].trim();
            return FacetKey::Attribute(name.to_string());
        }
        match trimmed.to_lowercase().as_str() {
            "application" | "applications" | "usecase" | "usecases" => FacetKey::Application,
            _ => FacetKey::for_attribute(trimmed),
        }
    }

    fn identity(&self) -> (u8, Cow<'_, str>) {
        match self {
            FacetKey::Application => (0, Cow::Borrowed("")),
            FacetKey::Wattage => (1, Cow::Borrowed("")),
            FacetKey::Color => (2, Cow::Borrowed("")),
            FacetKey::Attribute(name) => (3, Cow::Owned(name.trim().to_lowercase())),
        }
    }

    /// Label shown above the option list.
    pub fn label(&self) -> &str {
        match self {
            FacetKey::Application => "Applications",
            FacetKey::Wattage => "Wattage",
            FacetKey::Color => "Color",
            FacetKey::Attribute(name) => name,
        }
    }
}

impl PartialEq for FacetKey {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for FacetKey {}

impl PartialOrd for FacetKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FacetKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl Hash for FacetKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl From<AttributeKind> for FacetKey {
    fn from(kind: AttributeKind) -> Self {
        match kind {
            AttributeKind::Wattage => FacetKey::Wattage,
            AttributeKind::Color => FacetKey::Color,
        }
    }
}

impl fmt::Display for FacetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacetKey::Application => f.write_str("application"),
            FacetKey::Wattage => f.write_str("wattage"),
            FacetKey::Color => f.write_str("color"),
            FacetKey::Attribute(name) if FacetKey::parse_key(name) == *self => f.write_str(name),
            FacetKey::Attribute(name) => write!(f, "{ATTRIBUTE_PREFIX}{name}"),
        }
    }
}

impl FromStr for FacetKey {
    type Err = std::convert::Infallible;

    /// Any name parses: unknown names become dynamic attribute facets, and
    /// `attribute:<name>` always does.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FacetKey::parse_key(s))
    }
}

impl From<String> for FacetKey {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(key) => key,
            Err(never) => match never {},
        }
    }
}

impl From<FacetKey> for String {
    fn from(key: FacetKey) -> Self {
        key.to_string()
    }
}

/// Options for one facet, "All" first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub key: FacetKey,
    pub label: String,
    /// `"All"` followed by the sorted, de-duplicated values.
    pub values: Vec<String>,
}

impl FacetOptions {
    fn new(key: FacetKey, label: String, values: BTreeSet<String>) -> Self {
        let values = std::iter::once(ALL.to_string()).chain(values).collect();
        Self { key, label, values }
    }

    /// Selectable values without the "All" sentinel.
    pub fn concrete_values(&self) -> &[String] {
        &self.values[1..]
    }
}

/// Filter options discovered from a catalog.
///
/// Facets that have no values are left out entirely, so nothing is rendered
/// for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    facets: Vec<FacetOptions>,
}

impl FilterOptions {
    /// Scan every variation of every product.
    pub fn from_catalog(products: &[Product]) -> Self {
        let mut applications = BTreeSet::new();
        let mut wattage = BTreeSet::new();
        let mut color = BTreeSet::new();
        // lowercased name -> (first-seen name, values)
        let mut dynamic: BTreeMap<String, (String, BTreeSet<String>)> = BTreeMap::new();
        let mut skipped = 0usize;

        for variation in products.iter().flat_map(|p| &p.variations) {
            applications.extend(variation.usecases().map(str::to_string));

            for attribute in &variation.attributes {
                let name = attribute.name.trim();
                let mut values = attribute.values().map(str::to_string).peekable();
                if name.is_empty() || values.peek().is_none() {
                    skipped += 1;
                    continue;
                }

                match AttributeKind::for_attribute(name) {
                    Some(AttributeKind::Wattage) => wattage.extend(values),
                    Some(AttributeKind::Color) => color.extend(values),
                    None => {
                        dynamic
                            .entry(name.to_lowercase())
                            .or_insert_with(|| (name.to_string(), BTreeSet::new()))
                            .1
                            .extend(values);
                    }
                }
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, "skipped attributes with empty name or value");
        }

        let fixed = [
            (FacetKey::Application, applications),
            (FacetKey::Wattage, wattage),
            (FacetKey::Color, color),
        ];

        let facets: Vec<FacetOptions> = fixed
            .into_iter()
            .map(|(key, values)| {
                let label = key.label().to_string();
                (key, label, values)
            })
            .chain(
                dynamic
                    .into_values()
                    .map(|(name, values)| (FacetKey::Attribute(name.clone()), name, values)),
            )
            .filter(|(_, _, values)| !values.is_empty())
            .map(|(key, label, values)| FacetOptions::new(key, label, values))
            .collect();

        tracing::debug!(facets = facets.len(), "built filter options");
        Self { facets }
    }

    /// Options for a facet, or `None` when the catalog has no values for it.
    pub fn options(&self, key: &FacetKey) -> Option<&[String]> {
        self.facet(key).map(|facet| facet.values.as_slice())
    }

    /// The facet entry for a key.
    pub fn facet(&self, key: &FacetKey) -> Option<&FacetOptions> {
        self.facets.iter().find(|facet| &facet.key == key)
    }

    /// All facets, fixed ones first, then dynamic ones by name.
    pub fn facets(&self) -> &[FacetOptions] {
        &self.facets
    }

    /// Facets discovered from attribute names outside the alias table.
    pub fn dynamic(&self) -> impl Iterator<Item = &FacetOptions> {
        self.facets
            .iter()
            .filter(|facet| matches!(facet.key, FacetKey::Attribute(_)))
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Variation;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Pendant").with_variation(
                Variation::new("P1-A")
                    .with_usecase("Kitchen, Dining")
                    .with_attribute("Color", "Red, Blue")
                    .with_attribute("Wattage", "60W")
                    .with_attribute("Finish", "Matte"),
            ),
            Product::new("p2", "Sconce").with_variation(
                Variation::new("P2-A")
                    .with_usecase("Hallway")
                    .with_attribute("colour", "Blue")
                    .with_attribute("Power", "40W, 60W")
                    .with_attribute("finish", "Gloss")
                    .with_attribute("Material", "  "),
            ),
            Product::new("p3", "No variations"),
        ]
    }

    #[test]
    fn test_color_options_sorted_and_deduplicated() {
        let products = vec![Product::new("p1", "Lamp")
            .with_variation(Variation::new("A").with_attribute("Color", "Red, Blue"))];
        let options = FilterOptions::from_catalog(&products);

        assert_eq!(
            options.options(&FacetKey::Color).unwrap(),
            &["All".to_string(), "Blue".to_string(), "Red".to_string()]
        );
    }

    #[test]
    fn test_aliases_share_a_bucket() {
        let options = FilterOptions::from_catalog(&catalog());

        assert_eq!(options.options(&FacetKey::Color).unwrap(), &["All", "Blue", "Red"]);
        assert_eq!(options.options(&FacetKey::Wattage).unwrap(), &["All", "40W", "60W"]);
        assert_eq!(
            options.options(&FacetKey::Application).unwrap(),
            &["All", "Dining", "Hallway", "Kitchen"]
        );
    }

    #[test]
    fn test_dynamic_attributes_grouped_case_insensitively() {
        let options = FilterOptions::from_catalog(&catalog());

        let dynamic: Vec<&FacetOptions> = options.dynamic().collect();
        assert_eq!(dynamic.len(), 1);
        assert_eq!(dynamic[0].label, "Finish");
        assert_eq!(dynamic[0].values, vec!["All", "Gloss", "Matte"]);
        assert_eq!(dynamic[0].concrete_values(), &["Gloss", "Matte"]);
    }

    #[test]
    fn test_empty_values_yield_no_facet() {
        let options = FilterOptions::from_catalog(&catalog());
        assert!(options.options(&FacetKey::Attribute("Material".into())).is_none());

        let empty = FilterOptions::from_catalog(&[]);
        assert!(empty.is_empty());
        assert!(empty.options(&FacetKey::Color).is_none());
    }

    #[test]
    fn test_facet_order() {
        let options = FilterOptions::from_catalog(&catalog());
        let keys: Vec<&FacetKey> = options.facets().iter().map(|f| &f.key).collect();
        assert_eq!(
            keys,
            vec![
                &FacetKey::Application,
                &FacetKey::Wattage,
                &FacetKey::Color,
                &FacetKey::Attribute("Finish".into())
            ]
        );
    }

    #[test]
    fn test_facet_key_parsing() {
        assert_eq!("Colour".parse::<FacetKey>().unwrap(), FacetKey::Color);
        assert_eq!("watts".parse::<FacetKey>().unwrap(), FacetKey::Wattage);
        assert_eq!("usecase".parse::<FacetKey>().unwrap(), FacetKey::Application);
        assert_eq!(
            " Finish ".parse::<FacetKey>().unwrap(),
            FacetKey::Attribute("Finish".into())
        );
    }

    #[test]
    fn test_dynamic_facet_lookup_ignores_case() {
        let options = FilterOptions::from_catalog(&catalog());
        let key: FacetKey = "finish".parse().unwrap();

        assert_eq!(key, FacetKey::Attribute("Finish".into()));
        assert_eq!(options.options(&key).unwrap(), &["All", "Gloss", "Matte"]);
        assert_eq!(options.facet(&key).unwrap().label, "Finish");
    }

    #[test]
    fn test_reserved_attribute_names_use_prefix() {
        let usecase = FacetKey::Attribute("Usecase".into());
        assert_eq!(usecase.to_string(), "attribute:Usecase");
        assert_eq!("attribute:Usecase".parse::<FacetKey>().unwrap(), usecase);
        assert_eq!("Usecase".parse::<FacetKey>().unwrap(), FacetKey::Application);

        let json = serde_json::to_string(&usecase).unwrap();
        assert_eq!(json, "\"attribute:Usecase\"");
        let back: FacetKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, usecase);

        let finish = FacetKey::Attribute("Finish".into());
        assert_eq!(finish.to_string(), "Finish");

        let odd = FacetKey::Attribute("attribute:x".into());
        assert_eq!(odd.to_string().parse::<FacetKey>().unwrap(), odd);
    }

    #[test]
    fn test_attribute_named_like_fixed_facet_is_selectable() {
        let products = vec![Product::new("p1", "Lamp").with_variation(
            Variation::new("A")
                .with_usecase("Kitchen")
                .with_attribute("Application", "Wall"),
        )];
        let options = FilterOptions::from_catalog(&products);
        let dynamic: Vec<&FacetOptions> = options.dynamic().collect();
        assert_eq!(dynamic.len(), 1);

        let key: FacetKey = dynamic[0].key.to_string().parse().unwrap();
        assert_eq!(options.options(&key).unwrap(), &["All", "Wall"]);
        assert_eq!(options.options(&FacetKey::Application).unwrap(), &["All", "Kitchen"]);
    }

    #[test]
    fn test_accepts_attribute() {
        assert!(FacetKey::Color.accepts_attribute("COLOUR"));
        assert!(!FacetKey::Color.accepts_attribute("Finish"));
        assert!(FacetKey::Attribute("Finish".into()).accepts_attribute("finish"));
        assert!(!FacetKey::Application.accepts_attribute("Application"));
    }
}
