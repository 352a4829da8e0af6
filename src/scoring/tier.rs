use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::models::{GiftTier, TitleRule, GIFT_TIERS};

/// Anything that qualifies once a score reaches its threshold.
pub trait Threshold {
    fn threshold(&self) -> f64;
}

impl Threshold for TitleRule {
    fn threshold(&self) -> f64 {
        self.score
    }
}

impl Threshold for GiftTier {
    fn threshold(&self) -> f64 {
        self.min
    }
}

fn by_threshold<R: Threshold>(a: &R, b: &R) -> Ordering {
    a.threshold()
        .partial_cmp(&b.threshold())
        .unwrap_or(Ordering::Equal)
}

/// Highest tier whose threshold `score` meets.
///
/// Rules are visited from the highest threshold down and the first one at or
/// below `score` wins. Among equal thresholds the rule defined first wins.
pub fn resolve_tier<R: Threshold>(rules: &[R], score: f64) -> Option<&R> {
    let mut sorted: Vec<&R> = rules.iter().collect();
    sorted.sort_by(|a, b| by_threshold(*b, *a));
    sorted.into_iter().find(|rule| rule.threshold() <= score)
}

/// Rules in ascending threshold order with duplicate thresholds collapsed.
///
/// The survivor of a duplicate run is the rule `resolve_tier` would pick, so
/// titles and progress always agree.
pub fn normalize_ascending<R: Threshold>(rules: &[R]) -> Vec<&R> {
    let mut sorted: Vec<&R> = rules.iter().collect();
    sorted.sort_by(|a, b| by_threshold(*a, *b));

    let before = sorted.len();
    sorted.dedup_by(|later, earlier| later.threshold() == earlier.threshold());
    if sorted.len() < before {
        debug!("Collapsed {} duplicate tier thresholds", before - sorted.len());
    }
    sorted
}

/// Gift shelf for a required score. The static brackets cover every score.
pub fn gift_tier_for(score: f64) -> &'static GiftTier {
    resolve_tier(&GIFT_TIERS, score).unwrap_or(&GIFT_TIERS[0])
}

/// Decorative frame drawn around a student's portrait.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FrameTier {
    Gold,
    Silver,
    Bronze,
}

struct FrameRule {
    min: f64,
    frame: FrameTier,
}

impl Threshold for FrameRule {
    fn threshold(&self) -> f64 {
        self.min
    }
}

const FRAME_RULES: [FrameRule; 3] = [
    FrameRule { min: 80.0, frame: FrameTier::Gold },
    FrameRule { min: 35.0, frame: FrameTier::Silver },
    FrameRule { min: 20.0, frame: FrameTier::Bronze },
];

impl FrameTier {
    pub fn from_score(cumulative_score: f64) -> Option<Self> {
        resolve_tier(&FRAME_RULES, cumulative_score).map(|rule| rule.frame)
    }
}
