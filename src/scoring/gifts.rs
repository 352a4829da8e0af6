use serde::Serialize;
use std::cmp::Ordering;

use crate::models::{Gift, GiftTier, GIFT_TIERS};
use crate::scoring::tier::gift_tier_for;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GiftShelf<'a> {
    pub tier: &'static GiftTier,
    pub gifts: Vec<&'a Gift>,
}

/// In-stock gifts first, then by required score, lowest first.
fn shelf_order(a: &Gift, b: &Gift) -> Ordering {
    a.is_sold_out().cmp(&b.is_sold_out()).then_with(|| {
        a.required_score
            .partial_cmp(&b.required_score)
            .unwrap_or(Ordering::Equal)
    })
}

/// Gifts grouped into the five fixed tiers, lowest tier first.
///
/// Every tier is present, even when it holds no gifts.
pub fn gift_shelves(gifts: &[Gift]) -> Vec<GiftShelf<'_>> {
    let mut shelves: Vec<GiftShelf<'_>> = GIFT_TIERS
        .iter()
        .map(|tier| GiftShelf { tier, gifts: Vec::new() })
        .collect();

    for gift in gifts {
        let tier = gift_tier_for(gift.required_score);
        if let Some(shelf) = shelves.iter_mut().find(|s| std::ptr::eq(s.tier, tier)) {
            shelf.gifts.push(gift);
        }
    }

    for shelf in &mut shelves {
        shelf.gifts.sort_by(|a, b| shelf_order(a, b));
    }
    shelves
}

/// All gifts in display order: tier by tier, in-stock before sold out.
pub fn sort_gifts(gifts: &[Gift]) -> Vec<&Gift> {
    gift_shelves(gifts)
        .into_iter()
        .flat_map(|shelf| shelf.gifts)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quantity;

    #[test]
    fn test_sold_out_sorts_last_in_tier() {
        let gifts = vec![
            Gift::new("Eraser", 10.0, Quantity::Limited(0.0)),
            Gift::new("Sticker", 5.0, Quantity::Limited(3.0)),
            Gift::new("Pencil", 8.0, Quantity::Unlimited),
        ];
        let sorted: Vec<f64> = sort_gifts(&gifts).iter().map(|g| g.required_score).collect();
        assert_eq!(sorted, vec![5.0, 8.0, 10.0]);
    }

    #[test]
    fn test_sold_out_after_pricier_stock() {
        let gifts = vec![
            Gift::new("Badge", 7.0, Quantity::Limited(0.0)),
            Gift::new("Notebook", 20.0, Quantity::Limited(2.0)),
            Gift::new("Pen", 12.0, Quantity::Unlimited),
        ];
        let names: Vec<&str> = sort_gifts(&gifts).iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Pen", "Notebook", "Badge"]);
    }

    #[test]
    fn test_tiers_visited_in_ascending_order() {
        let gifts = vec![
            Gift::new("Trophy", 90.0, Quantity::Unlimited),
            Gift::new("Candy", 1.0, Quantity::Limited(0.0)),
            Gift::new("Book", 30.0, Quantity::Unlimited),
        ];
        let names: Vec<&str> = sort_gifts(&gifts).iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Candy", "Book", "Trophy"]);
    }

    #[test]
    fn test_empty_tiers_kept() {
        let gifts = vec![Gift::new("Book", 30.0, Quantity::Unlimited)];
        let shelves = gift_shelves(&gifts);
        assert_eq!(shelves.len(), 5);
        assert!(shelves[0].gifts.is_empty());
        assert_eq!(shelves[2].gifts.len(), 1);
        assert_eq!(shelves[2].tier.name, "榜眼賞");
    }
}
