//! Keyword-weighted product recommendations.
//!
//! Each selected facet value carries a keyword list. A product earns the
//! facet weight for every keyword found in its lowercased name and
//! description, plus fixed bonuses for quality indicators. Facets rank, they
//! do not exclude: only products that earn nothing at all are dropped.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CatalogError;
use crate::search::filter::FacetChoice;
use crate::search::keywords::keywords_for;

/// Results returned when at least one facet is selected.
pub const RESULT_LIMIT: usize = 8;

/// Products sampled when no facet is selected.
pub const CURATED_SIZE: usize = 12;

/// Quality indicators and the points each adds.
pub const BONUS_KEYWORDS: &[(&str, u32)] = &[
    ("led", 5),
    ("energy efficient", 3),
    ("dimmable", 3),
    ("smart", 4),
];

/// Upper bound (exclusive) of the tie-breaking jitter.
const JITTER_MAX: f64 = 2.0;

/// Upper bound (exclusive) of the display score given to curated picks.
const CURATED_SCORE_MAX: f64 = 10.0;

/// Facets the recommender understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendFacet {
    RoomType,
    RoomSize,
    LightingType,
    Style,
}

impl RecommendFacet {
    pub const ALL: [RecommendFacet; 4] = [
        RecommendFacet::RoomType,
        RecommendFacet::RoomSize,
        RecommendFacet::LightingType,
        RecommendFacet::Style,
    ];

    /// Points per matched keyword.
    pub fn weight(&self) -> u32 {
        match self {
            RecommendFacet::RoomType => 15,
            RecommendFacet::LightingType => 12,
            RecommendFacet::Style => 10,
            RecommendFacet::RoomSize => 8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendFacet::RoomType => "room_type",
            RecommendFacet::RoomSize => "room_size",
            RecommendFacet::LightingType => "lighting_type",
            RecommendFacet::Style => "style",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecommendFacet::RoomType => "Room Type",
            RecommendFacet::RoomSize => "Room Size",
            RecommendFacet::LightingType => "Lighting Type",
            RecommendFacet::Style => "Style",
        }
    }
}

impl fmt::Display for RecommendFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendFacet {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "roomtype" | "room" => Ok(RecommendFacet::RoomType),
            "roomsize" | "size" => Ok(RecommendFacet::RoomSize),
            "lightingtype" | "lighting" => Ok(RecommendFacet::LightingType),
            "style" => Ok(RecommendFacet::Style),
            _ => Err(CatalogError::UnknownFacet(s.to_string())),
        }
    }
}

/// The shopper's answers to the four recommendation questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendQuery {
    #[serde(default)]
    pub room_type: FacetChoice,
    #[serde(default)]
    pub room_size: FacetChoice,
    #[serde(default)]
    pub lighting_type: FacetChoice,
    #[serde(default)]
    pub style: FacetChoice,
}

impl RecommendQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a facet and return the query.
    pub fn with(mut self, facet: RecommendFacet, choice: impl Into<FacetChoice>) -> Self {
        *self.choice_mut(facet) = choice.into();
        self
    }

    pub fn choice(&self, facet: RecommendFacet) -> &FacetChoice {
        match facet {
            RecommendFacet::RoomType => &self.room_type,
            RecommendFacet::RoomSize => &self.room_size,
            RecommendFacet::LightingType => &self.lighting_type,
            RecommendFacet::Style => &self.style,
        }
    }

    fn choice_mut(&mut self, facet: RecommendFacet) -> &mut FacetChoice {
        match facet {
            RecommendFacet::RoomType => &mut self.room_type,
            RecommendFacet::RoomSize => &mut self.room_size,
            RecommendFacet::LightingType => &mut self.lighting_type,
            RecommendFacet::Style => &mut self.style,
        }
    }

    /// Selected facets and values.
    pub fn active(&self) -> impl Iterator<Item = (RecommendFacet, &str)> {
        RecommendFacet::ALL
            .into_iter()
            .filter_map(|facet| self.choice(facet).value().map(|value| (facet, value)))
    }

    /// True when every facet is "All".
    pub fn is_unconstrained(&self) -> bool {
        self.active().next().is_none()
    }
}

/// Keywords one facet matched in a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetMatch {
    pub facet: RecommendFacet,
    pub keywords: Vec<&'static str>,
}

impl FacetMatch {
    pub fn points(&self) -> u32 {
        self.keywords.len() as u32 * self.facet.weight()
    }
}

/// Deterministic part of a product's score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Relevance {
    /// Facets with at least one keyword hit.
    pub matched: Vec<FacetMatch>,
    /// Bonus keywords found.
    pub bonuses: Vec<&'static str>,
    /// Facet points plus bonus points.
    pub points: u32,
}

impl Relevance {
    /// Score a product against the selected facets.
    pub fn of(product: &Product, query: &RecommendQuery) -> Self {
        let search = product.search_text();

        let matched: Vec<FacetMatch> = query
            .active()
            .filter_map(|(facet, value)| {
                let keywords: Vec<&'static str> = keywords_for(facet, value)
                    .iter()
                    .copied()
                    .filter(|keyword| search.contains(keyword))
                    .collect();
                (!keywords.is_empty()).then_some(FacetMatch { facet, keywords })
            })
            .collect();

        let bonuses: Vec<&'static str> = BONUS_KEYWORDS
            .iter()
            .filter(|(keyword, _)| search.contains(keyword))
            .map(|(keyword, _)| *keyword)
            .collect();

        let facet_points: u32 = matched.iter().map(FacetMatch::points).sum();
        let bonus_points: u32 = BONUS_KEYWORDS
            .iter()
            .filter(|(keyword, _)| bonuses.contains(keyword))
            .map(|(_, points)| points)
            .sum();

        Self {
            matched,
            bonuses,
            points: facet_points + bonus_points,
        }
    }
}

/// A recommended product.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredProduct<'a> {
    pub product: &'a Product,
    /// Ranking score: relevance points plus jitter, or a random display
    /// score for curated picks.
    pub score: f64,
    pub relevance: Relevance,
}

/// Outcome of a recommendation run.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendations<'a> {
    /// Ranked products, truncated to the limit.
    pub items: Vec<ScoredProduct<'a>>,
    /// Matches before truncation.
    pub total_matches: usize,
    /// Whether this is the random selection shown when nothing is selected.
    pub curated: bool,
}

impl<'a> Recommendations<'a> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Tie-breaking jitter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Jitter {
    /// Add a uniform `[0, 2)` to every surviving product.
    #[default]
    Enabled,
    /// Rank by relevance points alone.
    Disabled,
}

/// Ranks a catalog against a [`RecommendQuery`].
///
/// Randomness (jitter and curated sampling) comes from the caller's RNG, so a
/// seeded generator gives reproducible output.
#[derive(Debug, Clone)]
pub struct Recommender {
    limit: usize,
    curated_size: usize,
    jitter: Jitter,
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

impl Recommender {
    pub fn new() -> Self {
        Self {
            limit: RESULT_LIMIT,
            curated_size: CURATED_SIZE,
            jitter: Jitter::Enabled,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_curated_size(mut self, curated_size: usize) -> Self {
        self.curated_size = curated_size;
        self
    }

    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn recommend<'a, R: Rng>(
        &self,
        products: &'a [Product],
        query: &RecommendQuery,
        rng: &mut R,
    ) -> Recommendations<'a> {
        if query.is_unconstrained() {
            return self.curated(products, rng);
        }

        let mut items: Vec<ScoredProduct<'a>> = products
            .iter()
            .filter_map(|product| {
                let relevance = Relevance::of(product, query);
                if relevance.points == 0 {
                    return None;
                }
                tracing::trace!(product = %product.id, points = relevance.points, "scored");
                Some(ScoredProduct {
                    product,
                    score: f64::from(relevance.points),
                    relevance,
                })
            })
            .collect();

        if self.jitter == Jitter::Enabled {
            for item in &mut items {
                item.score += rng.gen_range(0.0..JITTER_MAX);
            }
        }

        items.sort_by(|a, b| b.score.total_cmp(&a.score));

        let total_matches = items.len();
        items.truncate(self.limit);

        tracing::debug!(
            facets = query.active().count(),
            total_matches,
            returned = items.len(),
            "ranked recommendations"
        );

        Recommendations {
            items,
            total_matches,
            curated: false,
        }
    }

    /// Random sample shown when no facet is selected.
    fn curated<'a, R: Rng>(&self, products: &'a [Product], rng: &mut R) -> Recommendations<'a> {
        let picks: Vec<&'a Product> = products.choose_multiple(rng, self.curated_size).collect();

        let items: Vec<ScoredProduct<'a>> = picks
            .into_iter()
            .map(|product| ScoredProduct {
                product,
                score: rng.gen_range(0.0..CURATED_SCORE_MAX),
                relevance: Relevance::default(),
            })
            .collect();

        tracing::debug!(returned = items.len(), of = products.len(), "curated selection");

        Recommendations {
            total_matches: items.len(),
            items,
            curated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Variation;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scenario() -> Vec<Product> {
        vec![
            Product::new("p1", "Kitchen Pendant LED")
                .with_variation(Variation::new("P1").with_usecase("Kitchen")),
            Product::new("p2", "Bedroom Lamp")
                .with_variation(Variation::new("P2").with_usecase("Bedroom")),
            Product::new("p3", "Office Desk Light")
                .with_variation(Variation::new("P3").with_usecase("Office, Task")),
        ]
    }

    fn fixed_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_kitchen_scenario() {
        let products = scenario();
        let query = RecommendQuery::new().with(RecommendFacet::RoomType, "Kitchen");
        let result = Recommender::new()
            .with_jitter(Jitter::Disabled)
            .recommend(&products, &query, &mut fixed_rng());

        assert!(!result.curated);
        assert_eq!(result.total_matches, 1);
        assert_eq!(result.items[0].product.id.as_str(), "p1");
        assert_eq!(result.items[0].score, 20.0);
        assert_eq!(result.items[0].relevance.bonuses, vec!["led"]);
        assert_eq!(result.items[0].relevance.matched[0].keywords, vec!["kitchen"]);
    }

    #[test]
    fn test_jitter_stays_below_two() {
        let products = scenario();
        let query = RecommendQuery::new().with(RecommendFacet::RoomType, "Kitchen");
        let mut rng = StdRng::seed_from_u64(7);
        let result = Recommender::new().recommend(&products, &query, &mut rng);

        let score = result.items[0].score;
        assert!((20.0..22.0).contains(&score), "score {score}");
        assert_eq!(result.total_matches, 1);
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].product.id.as_str(), "p1");
    }

    #[test]
    fn test_jitter_never_admits_zero_point_products() {
        // Bedroom Lamp and Office Desk Light carry no Scandinavian or bonus keyword.
        let catalog = scenario();
        let products = &catalog[1..];
        let query = RecommendQuery::new().with(RecommendFacet::Style, "Scandinavian");
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = Recommender::new().recommend(products, &query, &mut rng);
            assert_eq!(result.total_matches, 0, "seed {seed}");
            assert!(result.items.is_empty());
            assert!(!result.curated);
        }
    }

    #[test]
    fn test_bonus_only_product_is_kept() {
        let products = vec![Product::new("p1", "Smart Bulb").with_description("Dimmable")];
        let query = RecommendQuery::new().with(RecommendFacet::Style, "Rustic");
        let result = Recommender::new()
            .with_jitter(Jitter::Disabled)
            .recommend(&products, &query, &mut fixed_rng());

        assert_eq!(result.total_matches, 1);
        assert_eq!(result.items[0].score, 7.0);
        assert!(result.items[0].relevance.matched.is_empty());
    }

    #[test]
    fn test_weights_and_multiple_keywords() {
        let product = Product::new("p1", "Modern Sleek Desk Lamp")
            .with_description("Adjustable task light for a compact office");
        let query = RecommendQuery::new()
            .with(RecommendFacet::RoomType, "Office")
            .with(RecommendFacet::RoomSize, "Small")
            .with(RecommendFacet::LightingType, "Task")
            .with(RecommendFacet::Style, "Modern");

        let relevance = Relevance::of(&product, &query);
        // office: office, desk, task = 3 * 15
        // small: compact = 1 * 8
        // task: task, desk, adjustable = 3 * 12
        // modern: modern, sleek = 2 * 10
        assert_eq!(relevance.points, 45 + 8 + 36 + 20);
        assert!(relevance.bonuses.is_empty());
    }

    #[test]
    fn test_limit_and_total() {
        let products: Vec<Product> = (0..20)
            .map(|i| Product::new(format!("p{i}"), format!("Kitchen light {i}")))
            .collect();
        let query = RecommendQuery::new().with(RecommendFacet::RoomType, "Kitchen");
        let result = Recommender::new().recommend(&products, &query, &mut StdRng::seed_from_u64(1));

        assert_eq!(result.total_matches, 20);
        assert_eq!(result.len(), RESULT_LIMIT);
    }

    #[test]
    fn test_stable_order_without_jitter() {
        let products = vec![
            Product::new("a", "Kitchen lamp"),
            Product::new("b", "Kitchen island LED"),
            Product::new("c", "Kitchen sconce"),
        ];
        let query = RecommendQuery::new().with(RecommendFacet::RoomType, "Kitchen");
        let result = Recommender::new()
            .with_jitter(Jitter::Disabled)
            .recommend(&products, &query, &mut fixed_rng());

        let order: Vec<&str> = result.items.iter().map(|s| s.product.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_curated_when_unconstrained() {
        let products: Vec<Product> = (0..30)
            .map(|i| Product::new(format!("p{i}"), "Lamp"))
            .collect();
        let query = RecommendQuery::new().with(RecommendFacet::Style, "All");
        let result = Recommender::new().recommend(&products, &query, &mut StdRng::seed_from_u64(3));

        assert!(result.curated);
        assert_eq!(result.len(), CURATED_SIZE);
        assert_eq!(result.total_matches, CURATED_SIZE);
        assert!(result.items.iter().all(|s| (0.0..10.0).contains(&s.score)));
    }

    #[test]
    fn test_curated_small_catalog() {
        let products = scenario();
        let result =
            Recommender::new().recommend(&products, &RecommendQuery::new(), &mut fixed_rng());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_unknown_value_scores_only_bonuses() {
        let products = scenario();
        let query = RecommendQuery::new().with(RecommendFacet::RoomType, "Garage");
        let result = Recommender::new()
            .with_jitter(Jitter::Disabled)
            .recommend(&products, &query, &mut fixed_rng());

        assert_eq!(result.total_matches, 1);
        assert_eq!(result.items[0].score, 5.0);
    }

    #[test]
    fn test_facet_parsing() {
        assert_eq!("room_type".parse::<RecommendFacet>().unwrap(), RecommendFacet::RoomType);
        assert_eq!("Lighting Type".parse::<RecommendFacet>().unwrap(), RecommendFacet::LightingType);
        assert_eq!("room-size".parse::<RecommendFacet>().unwrap(), RecommendFacet::RoomSize);
        assert!(matches!(
            "budget".parse::<RecommendFacet>(),
            Err(CatalogError::UnknownFacet(_))
        ));
    }
}
