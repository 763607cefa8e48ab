//! Product and variation types.

use crate::ids::{CollectionId, ProductId};
use crate::money::{self, Money};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Split a comma-separated field into trimmed, non-empty tokens.
///
/// Attribute values and usecases are free text such as `"Red, Blue"`; every
/// comparison in the crate goes through this.
pub fn split_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|token| !token.is_empty())
}

/// `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Free text: numbers and booleans keep their literal text, anything else
/// that is not a string reads as empty.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Decode the entries of a JSON array one by one, dropping those that do not
/// decode. Anything other than an array yields no entries.
pub(crate) fn lenient_entries<T: DeserializeOwned>(value: Value) -> Vec<T> {
    let Value::Array(entries) = value else {
        return Vec::new();
    };
    let total = entries.len();
    let kept: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();
    if kept.len() < total {
        tracing::debug!(skipped = total - kept.len(), "skipped malformed catalog entries");
    }
    kept
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(lenient_entries(Value::deserialize(deserializer)?))
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Product {
    /// Backend identifier. Empty when the backend sent none.
    #[serde(default, alias = "_id", deserialize_with = "null_as_default")]
    pub id: ProductId,
    /// Product name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Free-text description.
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Collection this product is listed under.
    #[serde(default, alias = "collectionId")]
    pub collection: Option<CollectionId>,
    /// Purchasable configurations, in display order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub variations: Vec<Variation>,
}

impl Product {
    /// Create a product with no variations.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a variation.
    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variations.push(variation);
        self
    }

    /// Lowercased name and description, the text the recommender scores.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.name, self.description).to_lowercase()
    }

    /// Lowest price across variations, if any variation is priced.
    pub fn min_price(&self) -> Option<Money> {
        self.variations
            .iter()
            .filter_map(|v| v.price)
            .min_by_key(|price| price.amount_cents)
    }

    /// Lowest and highest variation price.
    pub fn price_range(&self) -> Option<(Money, Money)> {
        let min = self.min_price()?;
        let max = self
            .variations
            .iter()
            .filter_map(|v| v.price)
            .max_by_key(|price| price.amount_cents)?;
        Some((min, max))
    }

    /// Image to show for the product: the first variation's primary image.
    pub fn primary_image(&self) -> Option<&Image> {
        self.variations.iter().find_map(Variation::primary_image)
    }

    /// Look up a variation by SKU.
    pub fn variation(&self, sku: &str) -> Option<&Variation> {
        self.variations.iter().find(|v| v.sku == sku)
    }
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Variation {
    /// Stock keeping unit.
    #[serde(default, deserialize_with = "lenient_text")]
    pub sku: String,
    /// Price, when the backend has one.
    #[serde(default, deserialize_with = "money::lenient_price")]
    pub price: Option<Money>,
    /// Comma-separated usecase tags (e.g. "Office, Task").
    #[serde(default, deserialize_with = "lenient_text")]
    pub usecase: String,
    /// Named attributes, in display order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub attributes: Vec<Attribute>,
    /// Images, in display order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub images: Vec<Image>,
}

impl Variation {
    /// Create a new variation.
    pub fn new(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            ..Self::default()
        }
    }

    /// Set the price.
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the usecase tags.
    pub fn with_usecase(mut self, usecase: impl Into<String>) -> Self {
        self.usecase = usecase.into();
        self
    }

    /// Append an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Append an image.
    pub fn with_image(mut self, url: impl Into<String>, primary: bool) -> Self {
        self.images.push(Image {
            url: url.into(),
            primary,
        });
        self
    }

    /// Usecase tags, split and trimmed.
    pub fn usecases(&self) -> impl Iterator<Item = &str> {
        split_values(&self.usecase)
    }

    /// First image flagged primary, falling back to the first image.
    pub fn primary_image(&self) -> Option<&Image> {
        self.images
            .iter()
            .find(|image| image.primary)
            .or_else(|| self.images.first())
    }
}

/// A named attribute such as `Color: Red, Blue`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Attribute {
    /// Attribute name (e.g. "Color", "Wattage").
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    /// Comma-separated values.
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Values, split and trimmed.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        split_values(&self.value)
    }
}

/// A variation image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Image {
    /// URL or stored filename.
    #[serde(default, alias = "image", deserialize_with = "lenient_text")]
    pub url: String,
    /// Whether this is the variation's main image.
    #[serde(default, alias = "isPrimary", deserialize_with = "null_as_default")]
    pub primary: bool,
}
