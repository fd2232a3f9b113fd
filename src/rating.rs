//! Quality rating from the maintainability score
//!
//! The tier is a pure function of the score. The flavor line attached to it
//! is the one random element of a report, so the draw goes through a
//! [`FlavorSource`] the caller picks: [`SeededSource`] for reproducible output,
//! [`ThreadSource`] for the default CLI run.

use crate::error::{ReportError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Quality tiers, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityRating {
    Excellent,
    Good,
    Fair,
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

impl QualityRating {
    pub const ALL: [QualityRating; 5] = [
        QualityRating::Excellent,
        QualityRating::Good,
        QualityRating::Fair,
        QualityRating::Poor,
        QualityRating::VeryPoor,
    ];

    /// Tier for a 0-100 score
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => QualityRating::Excellent,
            s if s >= 60.0 => QualityRating::Good,
            s if s >= 40.0 => QualityRating::Fair,
            s if s >= 20.0 => QualityRating::Poor,
            _ => QualityRating::VeryPoor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityRating::Excellent => "Excellent",
            QualityRating::Good => "Good",
            QualityRating::Fair => "Fair",
            QualityRating::Poor => "Poor",
            QualityRating::VeryPoor => "Very Poor",
        }
    }

    fn index(&self) -> usize {
        match self {
            QualityRating::Excellent => 0,
            QualityRating::Good => 1,
            QualityRating::Fair => 2,
            QualityRating::Poor => 3,
            QualityRating::VeryPoor => 4,
        }
    }
}

impl std::fmt::Display for QualityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

const EXCELLENT: &[&str] = &[
    "This codebase is a pleasure to read. Whoever maintains it sleeps well.",
    "Clean enough to hand to a new hire on day one.",
    "Small functions, clear names, few surprises. Keep doing exactly this.",
    "The reviewers are going to run out of things to say.",
];

const GOOD: &[&str] = &[
    "Solid work with a few rough edges worth sanding down.",
    "Most of this reads well. The hot spots are easy to find and fix.",
    "Healthy overall. A refactoring sprint would make it shine.",
    "It works, it mostly makes sense, and the debt is still cheap.",
];

const FAIR: &[&str] = &[
    "It runs, but nobody is going to brag about it.",
    "Looks fine from a distance. Up close the cracks start to show.",
    "The bar was not high, and this cleared it. Barely.",
    "Every change here costs a little more than it should.",
];

const POOR: &[&str] = &[
    "Touching this code feels like defusing something.",
    "The debt is compounding faster than the features.",
    "New contributors will need a map, a guide and patience.",
    "Error handling here is more of a hope than a strategy.",
];

const VERY_POOR: &[&str] = &[
    "This needs a rescue plan, not a cleanup.",
    "Every file tells a different story, none of them happy.",
    "Somewhere in here is a working program trying to get out.",
    "Rewrite estimates are starting to look cheaper than fixes.",
];

/// Fewest lines a tier's flavor pool may hold
pub const MIN_POOL_SIZE: usize = 4;

/// Immutable flavor-text tables, one per tier
#[derive(Debug, Clone)]
pub struct FlavorPools {
    pools: [Vec<String>; 5],
}

impl Default for FlavorPools {
    fn default() -> Self {
        let owned = |lines: &[&str]| lines.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            pools: [
                owned(EXCELLENT),
                owned(GOOD),
                owned(FAIR),
                owned(POOR),
                owned(VERY_POOR),
            ],
        }
    }
}

impl FlavorPools {
    /// Replace the pool of one tier; it needs at least [`MIN_POOL_SIZE`] lines
    pub fn with_pool(mut self, rating: QualityRating, lines: Vec<String>) -> Result<Self> {
        if lines.len() < MIN_POOL_SIZE {
            return Err(ReportError::FlavorPoolTooSmall {
                rating: rating.label().to_string(),
                len: lines.len(),
                min: MIN_POOL_SIZE,
            });
        }
        self.pools[rating.index()] = lines;
        Ok(self)
    }

    pub fn pool(&self, rating: QualityRating) -> &[String] {
        &self.pools[rating.index()]
    }
}

/// Source of the single random choice in a report
pub trait FlavorSource {
    /// Pick an index in `0..len`; `len` is never zero
    fn pick(&mut self, len: usize) -> usize;
}

/// Reproducible source backed by ChaCha8
#[derive(Debug, Clone)]
pub struct SeededSource(ChaCha8Rng);

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl FlavorSource for SeededSource {
    fn pick(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }
}

/// Non-reproducible source using the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSource;

impl FlavorSource for ThreadSource {
    fn pick(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// A classified score with its flavor line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub tier: QualityRating,
    pub flavor_text: String,
}

/// Maps a maintainability score to a tier and a flavor line
pub struct RatingClassifier<S: FlavorSource> {
    pools: FlavorPools,
    source: S,
}

impl<S: FlavorSource> RatingClassifier<S> {
    pub fn new(pools: FlavorPools, source: S) -> Self {
        Self { pools, source }
    }

    pub fn with_source(source: S) -> Self {
        Self::new(FlavorPools::default(), source)
    }

    pub fn classify(&mut self, score: f64) -> Rating {
        let tier = QualityRating::from_score(score);
        let pool = self.pools.pool(tier);
        let flavor_text = pool[self.source.pick(pool.len())].clone();
        Rating { tier, flavor_text }
    }
}
