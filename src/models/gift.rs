use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Unlimited,
    Limited(f64),
}

impl Quantity {
    pub fn is_sold_out(&self) -> bool {
        matches!(self, Quantity::Limited(q) if *q == 0.0)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::Unlimited
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gift {
    pub name: String,
    pub required_score: f64,
    pub quantity: Quantity,
    pub image_url: Option<String>,
}

impl Gift {
    pub fn new(name: impl Into<String>, required_score: f64, quantity: Quantity) -> Self {
        Self {
            name: name.into(),
            required_score,
            quantity,
            image_url: None,
        }
    }

    pub fn is_sold_out(&self) -> bool {
        self.quantity.is_sold_out()
    }
}

/// A fixed required-score bracket used to shelve gifts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GiftTier {
    pub name: &'static str,
    pub range: &'static str,
    pub min: f64,
    pub max: f64,
}

/// The five gift brackets, lowest first. Together they cover every score.
pub static GIFT_TIERS: [GiftTier; 5] = [
    GiftTier { name: "秀才賞", range: "5分或以下", min: f64::NEG_INFINITY, max: 5.0 },
    GiftTier { name: "探花賞", range: "6至25分", min: 6.0, max: 25.0 },
    GiftTier { name: "榜眼賞", range: "26至40分", min: 26.0, max: 40.0 },
    GiftTier { name: "狀元賞", range: "41至85分", min: 41.0, max: 85.0 },
    GiftTier { name: "金榜之首", range: "86分以上", min: 86.0, max: f64::INFINITY },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_exact_zero_is_sold_out() {
        assert!(Quantity::Limited(0.0).is_sold_out());
        assert!(!Quantity::Limited(3.0).is_sold_out());
        assert!(!Quantity::Limited(-1.0).is_sold_out());
        assert!(!Quantity::Unlimited.is_sold_out());
    }

    #[test]
    fn test_gift_tiers_ascend() {
        for pair in GIFT_TIERS.windows(2) {
            assert!(pair[0].min < pair[1].min);
            assert!(pair[0].max < pair[1].min);
        }
    }
}
