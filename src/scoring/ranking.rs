use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::Student;

/// Dense rank of every student within their own group, keyed by name.
///
/// Students are ordered by cumulative score, highest first. Equal scores
/// share a rank and the next lower score is exactly one rank below, so
/// `[80, 80, 60]` ranks as `[1, 1, 2]`.
pub fn compute_ranks(students: &[Student]) -> BTreeMap<String, u32> {
    let mut groups: BTreeMap<&str, Vec<&Student>> = BTreeMap::new();
    for student in students {
        groups.entry(student.group_key()).or_default().push(student);
    }

    let mut ranks = BTreeMap::new();
    for members in groups.values_mut() {
        members.sort_by(|a, b| {
            b.cumulative_score
                .partial_cmp(&a.cumulative_score)
                .unwrap_or(Ordering::Equal)
        });

        let mut rank = 0;
        let mut last: Option<f64> = None;
        for student in members.iter() {
            match last {
                Some(score) if student.cumulative_score >= score => {}
                _ => {
                    rank += 1;
                    last = Some(student.cumulative_score);
                }
            }
            ranks.insert(student.name.clone(), rank);
        }
    }

    ranks
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn from_rank(rank: u32) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}
