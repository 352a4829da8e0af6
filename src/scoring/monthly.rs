use serde::Serialize;

use crate::models::Student;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum MonthlyStatus {
    /// Nobody in the group has scored this month.
    NoActivity,
    Leading,
    Trailing { gap: f64 },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlyStanding {
    pub leader_name: Option<String>,
    pub leader_score: f64,
    pub monthly_score: f64,
    pub status: MonthlyStatus,
}

/// Compare `target`'s monthly score with the best in `group`.
///
/// The leader is the first student in input order holding the group maximum.
/// Ties at the top all count as leading.
pub fn compare_monthly_leader(students: &[Student], group: &str, target: &Student) -> MonthlyStanding {
    let mut leader: Option<&Student> = None;
    for student in students.iter().filter(|s| s.is_in_group(group)) {
        match leader {
            Some(best) if student.monthly_score <= best.monthly_score => {}
            _ => leader = Some(student),
        }
    }

    let leader_score = leader.map(|s| s.monthly_score).unwrap_or(0.0);
    let status = if leader_score <= 0.0 {
        MonthlyStatus::NoActivity
    } else if target.monthly_score >= leader_score {
        MonthlyStatus::Leading
    } else {
        MonthlyStatus::Trailing {
            gap: leader_score - target.monthly_score,
        }
    };

    MonthlyStanding {
        leader_name: leader.map(|s| s.name.clone()),
        leader_score,
        monthly_score: target.monthly_score,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, monthly: f64) -> Student {
        Student::new(name, "Tigers").with_monthly(monthly)
    }

    #[test]
    fn test_no_activity_when_all_zero() {
        let students = vec![member("A", 0.0), member("B", 0.0)];
        for target in &students {
            let standing = compare_monthly_leader(&students, "Tigers", target);
            assert_eq!(standing.status, MonthlyStatus::NoActivity);
        }
    }

    #[test]
    fn test_tied_leaders_both_lead() {
        let students = vec![member("A", 10.0), member("B", 10.0)];
        for target in &students {
            let standing = compare_monthly_leader(&students, "Tigers", target);
            assert_eq!(standing.status, MonthlyStatus::Leading);
            assert_eq!(standing.leader_name.as_deref(), Some("A"));
        }
    }

    #[test]
    fn test_trailing_reports_gap() {
        let students = vec![member("A", 4.0), member("B", 12.0), member("C", 12.0)];
        let standing = compare_monthly_leader(&students, "Tigers", &students[0]);
        assert_eq!(standing.leader_name.as_deref(), Some("B"));
        assert_eq!(standing.leader_score, 12.0);
        assert_eq!(standing.status, MonthlyStatus::Trailing { gap: 8.0 });
    }

    #[test]
    fn test_other_groups_ignored() {
        let students = vec![
            member("A", 3.0),
            Student::new("Z", "Lions").with_monthly(50.0),
        ];
        let standing = compare_monthly_leader(&students, "Tigers", &students[0]);
        assert_eq!(standing.status, MonthlyStatus::Leading);
    }

    #[test]
    fn test_negative_scores_count_as_no_activity() {
        let students = vec![member("A", -2.0), member("B", -1.0)];
        let standing = compare_monthly_leader(&students, "Tigers", &students[0]);
        assert_eq!(standing.status, MonthlyStatus::NoActivity);
    }

    #[test]
    fn test_unknown_group() {
        let students = vec![member("A", 5.0)];
        let standing = compare_monthly_leader(&students, "Nobody", &students[0]);
        assert_eq!(standing.leader_name, None);
        assert_eq!(standing.status, MonthlyStatus::NoActivity);
    }
}
