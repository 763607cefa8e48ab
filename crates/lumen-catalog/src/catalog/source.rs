//! Decoding catalog payloads served by the storefront API.

use serde::Deserialize;
use serde_json::Value;

use crate::catalog::product::lenient_entries;
use crate::catalog::Product;
use crate::error::CatalogError;

/// The two shapes the products endpoint returns.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogPayload {
    Bare(Vec<Value>),
    Wrapped { products: Vec<Value> },
}

/// Parse a catalog from JSON.
///
/// Accepts either a bare array of products or an object with a `products`
/// array. Entries that are not product objects, and products without an id,
/// are skipped; only a payload that is not JSON or has neither shape is an
/// error.
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, CatalogError> {
    let payload: CatalogPayload = serde_json::from_str(json)?;
    let entries = match payload {
        CatalogPayload::Bare(entries) | CatalogPayload::Wrapped { products: entries } => entries,
    };

    let mut products: Vec<Product> = lenient_entries(Value::Array(entries));
    let before = products.len();
    products.retain(|product| !product.id.is_empty());
    if products.len() < before {
        tracing::warn!(skipped = before - products.len(), "skipped products without an id");
    }

    tracing::debug!(products = products.len(), "parsed catalog");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[
            {
                "_id": "p1",
                "name": "Kitchen Pendant LED",
                "description": "Dimmable pendant",
                "collectionId": "pendants",
                "variations": [
                    {
                        "sku": "KP-1",
                        "price": "129.00",
                        "usecase": "Kitchen, Dining",
                        "attributes": [{ "name": "Color", "value": "Black, Brass" }],
                        "images": [{ "image": "kp1.jpg", "isPrimary": true }]
                    }
                ]
            }
        ]"#;

        let products = parse_catalog(json).unwrap();
        assert_eq!(products.len(), 1);
        let product = &products[0];
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.collection.as_ref().unwrap().as_str(), "pendants");
        let variation = &product.variations[0];
        assert_eq!(variation.price.unwrap().amount_cents, 12900);
        assert_eq!(variation.images[0].url, "kp1.jpg");
        assert!(variation.images[0].primary);
    }

    #[test]
    fn test_parse_wrapped_with_missing_fields() {
        let json = r#"{ "products": [ { "id": "p2" }, { "id": "p3", "variations": [ { "price": "n/a" } ] } ] }"#;

        let products = parse_catalog(json).unwrap();
        assert_eq!(products.len(), 2);
        assert!(products[0].name.is_empty());
        assert!(products[0].variations.is_empty());
        assert!(products[1].variations[0].price.is_none());
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let json = r#"[
            { "id": "p1", "name": "Kitchen Pendant LED", "description": null, "collectionId": null },
            {
                "id": "p2",
                "name": "Lamp",
                "variations": [
                    {
                        "sku": null,
                        "price": null,
                        "usecase": null,
                        "attributes": [
                            { "name": "Color", "value": null },
                            { "name": null, "value": "Matte" },
                            { "name": "Finish", "value": "Gloss" }
                        ],
                        "images": null
                    }
                ]
            },
            { "id": "p3", "name": null, "variations": null }
        ]"#;

        let products = parse_catalog(json).unwrap();
        assert_eq!(products.len(), 3);
        assert!(products[0].description.is_empty());
        assert!(products[0].collection.is_none());

        let variation = &products[1].variations[0];
        assert!(variation.usecase.is_empty());
        assert!(variation.sku.is_empty());
        assert!(variation.images.is_empty());
        assert_eq!(variation.attributes.len(), 3);
        assert_eq!(variation.attributes[0].values().count(), 0);
        assert_eq!(variation.attributes[2].value, "Gloss");

        assert!(products[2].name.is_empty());
        assert!(products[2].variations.is_empty());
    }

    #[test]
    fn test_numeric_values_keep_their_text() {
        let json = r#"[{ "id": 5, "name": "Lamp", "collectionId": 7,
            "variations": [{ "attributes": [{ "name": "Wattage", "value": 60 }] }] }]"#;

        let products = parse_catalog(json).unwrap();
        assert_eq!(products[0].id.as_str(), "5");
        assert_eq!(products[0].collection.as_ref().unwrap().as_str(), "7");
        assert_eq!(products[0].variations[0].attributes[0].value, "60");
    }

    #[test]
    fn test_products_without_id_are_skipped() {
        let json = r#"[
            { "name": "No id" },
            { "id": null, "name": "Null id" },
            { "id": "", "name": "Blank id" },
            "not a product",
            { "id": "p1", "name": "Kept", "variations": [42, { "sku": "K-1" }] }
        ]"#;

        let products = parse_catalog(json).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Kept");
        assert_eq!(products[0].variations.len(), 1);
        assert_eq!(products[0].variations[0].sku, "K-1");
    }

    #[test]
    fn test_parse_garbage_is_error() {
        let err = parse_catalog("not json").unwrap_err();
        assert!(matches!(err, CatalogError::Serialization(_)));
    }
}
