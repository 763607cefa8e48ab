//! Keyword tables behind the recommendation facets.

use crate::search::recommend::RecommendFacet;

type KeywordTable = &'static [(&'static str, &'static [&'static str])];

const ROOM_TYPE: KeywordTable = &[
    ("Kitchen", &["kitchen", "cabinet", "island", "task", "counter", "culinary", "pantry"]),
    ("Living Room", &["living", "lounge", "sofa", "family room", "floor lamp", "ambient"]),
    ("Bedroom", &["bedroom", "bedside", "nightstand", "reading", "sleep", "soft"]),
    ("Bathroom", &["bathroom", "vanity", "mirror", "waterproof", "ip44", "damp"]),
    ("Office", &["office", "desk", "study", "work", "focus", "task"]),
    ("Dining Room", &["dining", "table", "chandelier", "pendant", "dinner"]),
    ("Outdoor", &["outdoor", "garden", "patio", "porch", "weatherproof", "exterior"]),
    ("Hallway", &["hallway", "corridor", "entry", "foyer", "stair", "ceiling"]),
];

const ROOM_SIZE: KeywordTable = &[
    ("Small", &["compact", "small", "mini", "petite", "slim"]),
    ("Medium", &["medium", "standard", "versatile", "mid"]),
    ("Large", &["large", "oversized", "statement", "grand", "wide", "high output"]),
];

const LIGHTING_TYPE: KeywordTable = &[
    ("Ambient", &["ambient", "ceiling", "flush", "diffused", "soft", "glow"]),
    ("Task", &["task", "desk", "reading", "focused", "adjustable", "under-cabinet"]),
    ("Accent", &["accent", "spot", "track", "highlight", "picture", "directional"]),
    ("Decorative", &["decorative", "chandelier", "pendant", "crystal", "artistic", "statement"]),
];

const STYLE: KeywordTable = &[
    ("Modern", &["modern", "sleek", "contemporary", "geometric"]),
    ("Traditional", &["traditional", "classic", "vintage", "ornate", "antique"]),
    ("Industrial", &["industrial", "metal", "exposed", "edison", "cage", "raw"]),
    ("Minimalist", &["minimalist", "minimal", "simple", "clean", "slim"]),
    ("Rustic", &["rustic", "wood", "farmhouse", "natural", "reclaimed"]),
    ("Scandinavian", &["scandinavian", "nordic", "white", "oak", "light wood"]),
];

fn table(facet: RecommendFacet) -> KeywordTable {
    match facet {
        RecommendFacet::RoomType => ROOM_TYPE,
        RecommendFacet::RoomSize => ROOM_SIZE,
        RecommendFacet::LightingType => LIGHTING_TYPE,
        RecommendFacet::Style => STYLE,
    }
}

/// Keywords for a facet value. Values match case-insensitively; unknown
/// values have no keywords.
pub fn keywords_for(facet: RecommendFacet, value: &str) -> &'static [&'static str] {
    let value = value.trim();
    table(facet)
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

/// Selectable values for a facet, in display order.
pub fn values_for(facet: RecommendFacet) -> impl Iterator<Item = &'static str> {
    table(facet).iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(
            keywords_for(RecommendFacet::RoomType, "kitchen"),
            keywords_for(RecommendFacet::RoomType, "Kitchen")
        );
        assert!(keywords_for(RecommendFacet::RoomType, "living room").contains(&"sofa"));
    }

    #[test]
    fn test_unknown_value_has_no_keywords() {
        assert!(keywords_for(RecommendFacet::Style, "Baroque").is_empty());
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for facet in RecommendFacet::ALL {
            for value in values_for(facet) {
                for keyword in keywords_for(facet, value) {
                    assert_eq!(*keyword, keyword.to_lowercase());
                }
            }
        }
    }
}
