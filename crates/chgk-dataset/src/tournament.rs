//! Tournament metadata and date-window selection
//!
//! Tournament metadata comes from an external catalog keyed by tournament id.
//! Each entry carries a start date and the number of questions per round:
//!
//! ```json
//! {
//!   "4772": {
//!     "dateStart": "2019-01-05T13:00:00+03:00",
//!     "questionQty": { "1": 12, "2": 12, "3": 12 }
//!   }
//! }
//! ```
//!
//! Selection by date is the first step of the pipeline: a training set is
//! usually one season (`"2019"`) and a test set the next one (`"2020"`).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::TournamentId;

/// Metadata for a single tournament
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TournamentInfo {
    /// Start timestamp as provided by the source (usually RFC 3339)
    #[serde(rename = "dateStart")]
    pub date_start: String,
    /// Question count per round, keyed by round name
    ///
    /// Required: without it the mask length of a team cannot be checked.
    #[serde(rename = "questionQty")]
    pub question_qty: BTreeMap<String, u32>,
}

impl TournamentInfo {
    /// Total number of questions played across all rounds
    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.question_qty.values().map(|&n| n as usize).sum()
    }

    /// Start date, if `date_start` can be read as a calendar date
    ///
    /// Accepts full RFC 3339 timestamps and anything starting with
    /// `YYYY-MM-DD`.
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.date_start) {
            return Some(ts.date_naive());
        }
        let day = self.date_start.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// Tournament metadata keyed by tournament id
///
/// Ids are kept in ascending order so that every selection made from the
/// catalog, and everything built downstream of it, is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TournamentCatalog {
    pub tournaments: BTreeMap<TournamentId, TournamentInfo>,
}

impl TournamentCatalog {
    #[must_use]
    pub fn get(&self, id: TournamentId) -> Option<&TournamentInfo> {
        self.tournaments.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    /// Ids whose `dateStart` begins with `prefix`
    ///
    /// No date validation is done; `"2019"` and `"2019-0"` are both valid
    /// prefixes. An empty selection is not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use chgk_dataset::tournament::TournamentCatalog;
    ///
    /// let catalog: TournamentCatalog = serde_json::from_str(
    ///     r#"{
    ///         "2": {"dateStart": "2020-02-01T10:00:00+03:00", "questionQty": {"1": 12}},
    ///         "1": {"dateStart": "2019-09-07T10:00:00+03:00", "questionQty": {"1": 12}}
    ///     }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(catalog.ids_by_date_prefix("2019"), vec![1]);
    /// assert!(catalog.ids_by_date_prefix("2021").is_empty());
    /// ```
    #[must_use]
    pub fn ids_by_date_prefix(&self, prefix: &str) -> Vec<TournamentId> {
        self.tournaments
            .iter()
            .filter(|(_, info)| info.date_start.starts_with(prefix))
            .map(|(&id, _)| id)
            .collect()
    }

    /// Ids whose start date falls in the half-open window `[start, end)`
    ///
    /// Entries with an unreadable `dateStart` are skipped.
    #[must_use]
    pub fn ids_in_date_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<TournamentId> {
        self.tournaments
            .iter()
            .filter(|(id, info)| match info.start_date() {
                Some(date) => start <= date && date < end,
                None => {
                    log::debug!(
                        "tournament {id}: unreadable dateStart {:?}, skipped",
                        info.date_start
                    );
                    false
                }
            })
            .map(|(&id, _)| id)
            .collect()
    }
}

impl FromIterator<(TournamentId, TournamentInfo)> for TournamentCatalog {
    fn from_iter<T: IntoIterator<Item = (TournamentId, TournamentInfo)>>(iter: T) -> Self {
        Self {
            tournaments: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(date_start: &str, rounds: &[u32]) -> TournamentInfo {
        TournamentInfo {
            date_start: date_start.to_owned(),
            question_qty: rounds
                .iter()
                .enumerate()
                .map(|(i, &n)| ((i + 1).to_string(), n))
                .collect(),
        }
    }

    fn catalog() -> TournamentCatalog {
        [
            (30, info("2020-01-11T12:00:00+03:00", &[15, 15])),
            (10, info("2019-03-02T12:00:00+03:00", &[12, 12, 12])),
            (20, info("2019-12-31", &[36])),
            (40, info("sometime", &[12])),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_total_questions_sums_rounds() {
        assert_eq!(info("2019", &[12, 12, 12]).total_questions(), 36);
        assert_eq!(info("2019", &[]).total_questions(), 0);
    }

    #[test]
    fn test_prefix_filter_is_sorted_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.ids_by_date_prefix("2019"), vec![10, 20]);
        assert_eq!(catalog.ids_by_date_prefix("2020-01"), vec![30]);
        assert_eq!(catalog.ids_by_date_prefix(""), vec![10, 20, 30, 40]);
    }

    #[test]
    fn test_prefix_filter_no_match_is_empty() {
        assert!(catalog().ids_by_date_prefix("2018").is_empty());
        assert!(TournamentCatalog::default().ids_by_date_prefix("2019").is_empty());
    }

    #[test]
    fn test_start_date_formats() {
        let date = NaiveDate::from_ymd_opt(2019, 3, 2);
        assert_eq!(info("2019-03-02T12:00:00+03:00", &[]).start_date(), date);
        assert_eq!(info("2019-03-02", &[]).start_date(), date);
        assert_eq!(info("2019-03-02 12:00", &[]).start_date(), date);
        assert_eq!(info("sometime", &[]).start_date(), None);
    }

    #[test]
    fn test_date_range_is_half_open() {
        let catalog = catalog();
        let start = NaiveDate::from_ymd_opt(2019, 3, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 1, 11).unwrap();
        assert_eq!(catalog.ids_in_date_range(start, end), vec![10, 20]);

        let end = NaiveDate::from_ymd_opt(2020, 1, 12).unwrap();
        assert_eq!(catalog.ids_in_date_range(start, end), vec![10, 20, 30]);
    }

    #[test]
    fn test_catalog_deserializes_integer_keys() {
        let catalog: TournamentCatalog = serde_json::from_str(
            r#"{"7": {"dateStart": "2019-01-01", "questionQty": {"1": 12, "2": 13}, "name": "x"}}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(7).unwrap().total_questions(), 25);
    }

    #[test]
    fn test_entry_without_question_qty_is_rejected() {
        let err = serde_json::from_str::<TournamentCatalog>(r#"{"1": {"dateStart": "2019-01-01"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("questionQty"));

        let catalog: TournamentCatalog =
            serde_json::from_str(r#"{"1": {"dateStart": "2019-01-01", "questionQty": {}}}"#)
                .unwrap();
        assert_eq!(catalog.get(1).unwrap().total_questions(), 0);
    }
}
