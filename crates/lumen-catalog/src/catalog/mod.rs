//! Product catalog module.
//!
//! Contains the product/variation model and catalog payload decoding.

mod product;
mod source;

pub use product::{split_values, Attribute, Image, Product, Variation};
pub use source::parse_catalog;
