//! Player rosters and the training vocabulary

use std::collections::HashSet;

use crate::{DatasetError, PlayerId, TournamentId, normalize::TourData, results::RawResults};

/// Flatten the rosters of the given tournaments into a list of player ids
///
/// Every team record counts, with or without a mask. Duplicates are kept and
/// ids appear in encounter order.
///
/// # Errors
///
/// Fails with the offending tournament id if its results are missing or a
/// record has no readable roster.
pub fn player_ids(
    ids: &[TournamentId],
    results: &RawResults,
) -> Result<Vec<PlayerId>, DatasetError> {
    let mut players = vec![];
    for &id in ids {
        for team in results.team_results(id)? {
            players.extend(team.players);
        }
    }
    Ok(players)
}

/// Players that received a learnable parameter during training
///
/// Built once from the training data and only read afterwards; test-time
/// rows for players outside the set are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainPlayerSet {
    players: HashSet<PlayerId>,
}

impl TrainPlayerSet {
    #[must_use]
    pub fn from_player_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = PlayerId>,
    {
        Self {
            players: ids.into_iter().collect(),
        }
    }

    /// Collect every player appearing in the given tournaments
    #[must_use]
    pub fn from_tours(tours: &[TourData]) -> Self {
        Self::from_player_ids(tours.iter().flat_map(TourData::player_ids))
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Player ids in ascending order
    #[must_use]
    pub fn sorted(&self) -> Vec<PlayerId> {
        let mut ids = self.players.iter().copied().collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }
}

impl FromIterator<PlayerId> for TrainPlayerSet {
    fn from_iter<T: IntoIterator<Item = PlayerId>>(iter: T) -> Self {
        Self::from_player_ids(iter)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::normalize::TeamOutcome;

    fn member(id: u64) -> serde_json::Value {
        json!({"player": {"id": id}})
    }

    #[test]
    fn test_player_ids_keep_duplicates_and_order() {
        let results: RawResults = [
            (1, vec![json!({"mask": "1", "teamMembers": [member(5), member(3)]})]),
            (2, vec![json!({"teamMembers": [member(3), member(9)]})]),
        ]
        .into_iter()
        .collect();
        assert_eq!(player_ids(&[2, 1], &results).unwrap(), vec![3, 9, 5, 3]);
        assert!(player_ids(&[], &results).unwrap().is_empty());
    }

    #[test]
    fn test_player_ids_malformed_entry() {
        let results: RawResults = [(4, vec![json!({"teamMembers": [{"flag": "K"}]})])]
            .into_iter()
            .collect();
        assert!(matches!(
            player_ids(&[4], &results),
            Err(DatasetError::MalformedRecord { tournament_id: 4, .. })
        ));
    }

    #[test]
    fn test_train_player_set_from_tours() {
        let tours = vec![
            TourData {
                tournament_id: 1,
                total_questions: 1,
                outcomes: vec![TeamOutcome::new(vec![2, 1], Some("1".into()))],
            },
            TourData {
                tournament_id: 2,
                total_questions: 1,
                outcomes: vec![TeamOutcome::new(vec![1, 7], None)],
            },
        ];
        let set = TrainPlayerSet::from_tours(&tours);
        assert_eq!(set.len(), 3);
        assert!(set.contains(7));
        assert!(!set.contains(3));
        assert_eq!(set.sorted(), vec![1, 2, 7]);
    }
}
