use serde::Serialize;

use crate::models::{TitleRule, NO_TITLE};
use crate::scoring::tier::normalize_ascending;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TierProgress {
    /// Tier the score currently sits in; a zero-threshold "no title" floor when none applies.
    pub current: TitleRule,
    pub next: Option<TitleRule>,
    pub percent: f64,
    /// Points still missing for `next`, absent once the top tier is reached.
    pub points_to_next: Option<f64>,
}

impl TierProgress {
    pub fn is_max_tier(&self) -> bool {
        self.next.is_none()
    }
}

/// Progress from the current title toward the next one.
///
/// Returns `None` when there are no rules to progress through.
pub fn compute_progress(rules: &[TitleRule], score: f64) -> Option<TierProgress> {
    if rules.is_empty() {
        return None;
    }

    let ladder = normalize_ascending(rules);
    let mut current = TitleRule::new(0.0, NO_TITLE);
    let mut next = None;
    for rule in ladder {
        if score >= rule.score {
            current = rule.clone();
        } else {
            next = Some(rule.clone());
            break;
        }
    }

    let progress = match next {
        None => TierProgress {
            current,
            next: None,
            percent: 100.0,
            points_to_next: None,
        },
        Some(next) => {
            let range = next.score - current.score;
            let percent = if range > 0.0 {
                ((score - current.score) / range * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            };
            TierProgress {
                points_to_next: Some(next.score - score),
                current,
                next: Some(next),
                percent,
            }
        }
    };

    Some(progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> Vec<TitleRule> {
        vec![TitleRule::new(0.0, "Novice"), TitleRule::new(100.0, "Master")]
    }

    #[test]
    fn test_top_tier_is_complete() {
        let progress = compute_progress(&ladder(), 100.0).unwrap();
        assert_eq!(progress.current.title, "Master");
        assert_eq!(progress.percent, 100.0);
        assert!(progress.is_max_tier());
        assert_eq!(progress.points_to_next, None);
    }

    #[test]
    fn test_mid_tier() {
        let progress = compute_progress(&ladder(), 50.0).unwrap();
        assert_eq!(progress.current.title, "Novice");
        assert_eq!(progress.next.as_ref().unwrap().title, "Master");
        assert_eq!(progress.percent, 50.0);
        assert_eq!(progress.points_to_next, Some(50.0));
    }

    #[test]
    fn test_below_first_threshold_uses_floor() {
        let rules = vec![TitleRule::new(20.0, "Apprentice"), TitleRule::new(60.0, "Adept")];
        let progress = compute_progress(&rules, 5.0).unwrap();
        assert_eq!(progress.current.title, NO_TITLE);
        assert_eq!(progress.current.score, 0.0);
        assert_eq!(progress.next.unwrap().title, "Apprentice");
        assert_eq!(progress.percent, 25.0);
        assert_eq!(progress.points_to_next, Some(15.0));
    }

    #[test]
    fn test_negative_score_clamps_to_zero() {
        let rules = vec![TitleRule::new(10.0, "Apprentice")];
        let progress = compute_progress(&rules, -5.0).unwrap();
        assert_eq!(progress.percent, 0.0);
        assert_eq!(progress.points_to_next, Some(15.0));
    }

    #[test]
    fn test_zero_width_range_never_divides() {
        let rules = vec![TitleRule::new(0.0, "Novice")];
        let progress = compute_progress(&rules, -3.0).unwrap();
        assert_eq!(progress.percent, 0.0);
        assert!(progress.percent.is_finite());

        let duplicated = vec![
            TitleRule::new(10.0, "A"),
            TitleRule::new(10.0, "B"),
            TitleRule::new(30.0, "C"),
        ];
        let progress = compute_progress(&duplicated, 20.0).unwrap();
        assert_eq!(progress.current.title, "A");
        assert_eq!(progress.next.unwrap().title, "C");
        assert_eq!(progress.percent, 50.0);
    }

    #[test]
    fn test_unsorted_rules() {
        let rules = vec![
            TitleRule::new(100.0, "Master"),
            TitleRule::new(0.0, "Novice"),
            TitleRule::new(50.0, "Scholar"),
        ];
        let progress = compute_progress(&rules, 75.0).unwrap();
        assert_eq!(progress.current.title, "Scholar");
        assert_eq!(progress.percent, 50.0);
        assert_eq!(progress.points_to_next, Some(25.0));
    }

    #[test]
    fn test_empty_rules() {
        assert!(compute_progress(&[], 42.0).is_none());
    }
}
