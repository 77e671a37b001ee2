//! Per-tournament normalization of raw results
//!
//! [`TourData::from_raw`] turns the raw records of one tournament into a
//! compact form holding only what the row expanders need: the question count
//! and, for every team that reported a mask, its roster and mask string.
//!
//! Mask lengths are not checked here. A broken mask only removes that team's
//! rows at expansion time; the rest of the tournament stays usable.

use crate::{
    DatasetError, PlayerId, TournamentId,
    results::{MaskField, RawResults},
    tournament::TournamentCatalog,
};

/// One team's participation in one tournament
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamOutcome {
    /// Player ids in roster order
    pub players: Vec<PlayerId>,
    /// Raw mask; `None` when the source reported an explicit `null`
    pub mask: Option<String>,
}

impl TeamOutcome {
    #[must_use]
    pub fn new(players: Vec<PlayerId>, mask: Option<String>) -> Self {
        Self { players, mask }
    }

    /// Mask, if present and non-empty
    #[must_use]
    pub fn usable_mask(&self) -> Option<&str> {
        self.mask.as_deref().filter(|mask| !mask.is_empty())
    }
}

/// Usable outcomes of a single tournament
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourData {
    pub tournament_id: TournamentId,
    /// Sum of question counts over all rounds
    pub total_questions: usize,
    /// Team outcomes in source order
    pub outcomes: Vec<TeamOutcome>,
}

impl TourData {
    /// Normalize the raw results of one tournament
    ///
    /// Records without a `mask` key are skipped.
    ///
    /// # Errors
    ///
    /// - [`DatasetError::UnknownTournament`] if `catalog` has no entry for the id
    /// - [`DatasetError::MissingResults`] if `results` has no entry for the id
    /// - [`DatasetError::MalformedRecord`] if a record cannot be decoded
    pub fn from_raw(
        tournament_id: TournamentId,
        results: &RawResults,
        catalog: &TournamentCatalog,
    ) -> Result<Self, DatasetError> {
        let info = catalog
            .get(tournament_id)
            .ok_or(DatasetError::UnknownTournament { tournament_id })?;
        let outcomes = results
            .team_results(tournament_id)?
            .into_iter()
            .filter_map(|team| match team.mask {
                MaskField::Missing => None,
                MaskField::Null => Some(TeamOutcome::new(team.players, None)),
                MaskField::Value(mask) => Some(TeamOutcome::new(team.players, Some(mask))),
            })
            .collect();
        Ok(Self {
            tournament_id,
            total_questions: info.total_questions(),
            outcomes,
        })
    }

    /// Normalize several tournaments, keeping the order of `ids`
    ///
    /// # Examples
    ///
    /// ```
    /// use chgk_dataset::{
    ///     normalize::TourData, results::RawResults, tournament::TournamentCatalog,
    /// };
    ///
    /// let tours = TourData::from_raw_many(&[], &RawResults::default(), &TournamentCatalog::default())?;
    /// assert!(tours.is_empty());
    /// # Ok::<(), chgk_dataset::DatasetError>(())
    /// ```
    pub fn from_raw_many(
        ids: &[TournamentId],
        results: &RawResults,
        catalog: &TournamentCatalog,
    ) -> Result<Vec<Self>, DatasetError> {
        ids.iter()
            .map(|&id| Self::from_raw(id, results, catalog))
            .collect()
    }

    /// Iterate over every player id of every outcome, duplicates included
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.outcomes
            .iter()
            .flat_map(|outcome| outcome.players.iter().copied())
    }
}
