use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Verse;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.split(['T', ' ']).next().unwrap_or(raw);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VerseBoard<'a> {
    pub current: Option<&'a Verse>,
    pub others: Vec<&'a Verse>,
}

/// Pick this week's verse and list the rest, newest start date first.
///
/// A verse is current when `today` falls inside its date range or it is
/// flagged as highlighted; the first such verse wins. Verses whose dates
/// cannot be read are left off the board.
pub fn verse_board(verses: &[Verse], today: NaiveDate) -> VerseBoard<'_> {
    let mut dated: Vec<(NaiveDate, NaiveDate, &Verse)> = verses
        .iter()
        .filter_map(|v| Some((parse_date(&v.start_date)?, parse_date(&v.end_date)?, v)))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut board = VerseBoard { current: None, others: Vec::new() };
    for (start, end, verse) in dated {
        let in_range = start <= today && today <= end;
        if board.current.is_none() && (in_range || verse.is_highlighted()) {
            board.current = Some(verse);
        } else {
            board.others.push(verse);
        }
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(text: &str, start: &str, end: &str) -> Verse {
        Verse {
            text: text.to_string(),
            reference: "Ps 1:1".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            highlight: String::new(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_current_by_date_range() {
        let verses = vec![
            verse("old", "2026-09-01", "2026-09-07"),
            verse("now", "2026-10-12", "2026-10-18"),
            verse("next", "2026-10-19", "2026-10-25"),
        ];
        let board = verse_board(&verses, day(2026, 10, 16));
        assert_eq!(board.current.unwrap().text, "now");
        let others: Vec<&str> = board.others.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(others, vec!["next", "old"]);
    }

    #[test]
    fn test_end_date_inclusive() {
        let verses = vec![verse("now", "2026/10/12", "2026/10/16")];
        let board = verse_board(&verses, day(2026, 10, 16));
        assert!(board.current.is_some());
    }

    #[test]
    fn test_highlight_wins_outside_range() {
        let mut flagged = verse("flagged", "2026-01-01", "2026-01-07");
        flagged.highlight = "yes".to_string();
        let verses = vec![flagged, verse("later", "2026-02-01", "2026-02-07")];
        let board = verse_board(&verses, day(2026, 10, 16));
        assert_eq!(board.current.unwrap().text, "flagged");
        assert_eq!(board.others.len(), 1);
    }

    #[test]
    fn test_unreadable_dates_dropped() {
        let verses = vec![verse("broken", "someday", "2026-10-20"), verse("ok", "2026-01-01", "2026-01-02")];
        let board = verse_board(&verses, day(2026, 10, 16));
        assert!(board.current.is_none());
        assert_eq!(board.others.len(), 1);
    }

    #[test]
    fn test_timestamp_dates_accepted() {
        assert_eq!(parse_date("2026-10-12T00:00:00.000Z"), Some(day(2026, 10, 12)));
    }
}
