//! Raw per-tournament team results
//!
//! Results arrive as a mapping from tournament id to a list of team records.
//! Only a small part of each record matters to the pipeline:
//!
//! ```json
//! {
//!   "4772": [
//!     {
//!       "team": { "id": 1, "name": "..." },
//!       "mask": "110X01?1...",
//!       "teamMembers": [
//!         { "flag": "Б", "player": { "id": 6212, "name": "..." } }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Records are stored as untyped JSON and decoded on access, so a broken
//! record is reported together with the tournament it belongs to instead of
//! failing the whole file.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::{DatasetError, PlayerId, TournamentId};

/// Raw team results keyed by tournament id
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RawResults {
    pub tournaments: BTreeMap<TournamentId, Vec<serde_json::Value>>,
}

/// State of the `mask` field of a team record
///
/// A missing key and an explicit `null` are kept apart: a team without the
/// key has no data at all and is skipped, while a `null` mask still yields a
/// team outcome that simply produces no rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MaskField {
    #[default]
    Missing,
    Null,
    Value(String),
}

impl<'de> Deserialize<'de> for MaskField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<String>::deserialize(deserializer)? {
            Some(mask) => MaskField::Value(mask),
            None => MaskField::Null,
        })
    }
}

/// A decoded team record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamResult {
    /// Player ids in roster order
    pub players: Vec<PlayerId>,
    pub mask: MaskField,
}

#[derive(Debug, Deserialize)]
struct TeamRecord {
    #[serde(rename = "teamMembers")]
    team_members: Vec<TeamMember>,
    #[serde(default)]
    mask: MaskField,
}

#[derive(Debug, Deserialize)]
struct TeamMember {
    player: PlayerRef,
}

#[derive(Debug, Deserialize)]
struct PlayerRef {
    id: PlayerId,
}

impl RawResults {
    #[must_use]
    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    /// Decode every team record of a tournament, in source order
    ///
    /// # Errors
    ///
    /// - [`DatasetError::MissingResults`] if the tournament has no entry
    /// - [`DatasetError::MalformedRecord`] if any record lacks its roster or
    ///   a player id
    pub fn team_results(
        &self,
        tournament_id: TournamentId,
    ) -> Result<Vec<TeamResult>, DatasetError> {
        let records = self
            .tournaments
            .get(&tournament_id)
            .ok_or(DatasetError::MissingResults { tournament_id })?;
        records
            .iter()
            .map(|value| -> Result<TeamResult, DatasetError> {
                let record = TeamRecord::deserialize(value).map_err(|source| {
                    DatasetError::MalformedRecord {
                        tournament_id,
                        source,
                    }
                })?;
                Ok(TeamResult {
                    players: record.team_members.into_iter().map(|m| m.player.id).collect(),
                    mask: record.mask,
                })
            })
            .collect()
    }
}

impl FromIterator<(TournamentId, Vec<serde_json::Value>)> for RawResults {
    fn from_iter<T: IntoIterator<Item = (TournamentId, Vec<serde_json::Value>)>>(iter: T) -> Self {
        Self {
            tournaments: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn results() -> RawResults {
        [(
            5,
            vec![
                json!({
                    "team": {"id": 1},
                    "mask": "01X1",
                    "teamMembers": [{"player": {"id": 10, "name": "a"}}, {"player": {"id": 11}}],
                }),
                json!({"mask": null, "teamMembers": [{"player": {"id": 12}}]}),
                json!({"teamMembers": [{"player": {"id": 13}}]}),
            ],
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_decodes_players_and_mask_states() {
        let teams = results().team_results(5).unwrap();
        assert_eq!(teams.len(), 3);
        assert_eq!(teams[0].players, vec![10, 11]);
        assert_eq!(teams[0].mask, MaskField::Value("01X1".into()));
        assert_eq!(teams[1].mask, MaskField::Null);
        assert_eq!(teams[2].mask, MaskField::Missing);
    }

    #[test]
    fn test_missing_tournament() {
        let err = results().team_results(6).unwrap_err();
        assert!(matches!(err, DatasetError::MissingResults { tournament_id: 6 }));
    }

    #[test]
    fn test_malformed_member_names_tournament() {
        let results: RawResults = [(9, vec![json!({"teamMembers": [{"player": {"name": "x"}}]})])]
            .into_iter()
            .collect();
        let err = results.team_results(9).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedRecord { tournament_id: 9, .. }));
        assert!(err.to_string().contains("tournament 9"));
    }

    #[test]
    fn test_missing_roster_is_malformed() {
        let results: RawResults = [(3, vec![json!({"mask": "1"})])].into_iter().collect();
        assert!(matches!(
            results.team_results(3),
            Err(DatasetError::MalformedRecord { tournament_id: 3, .. })
        ));
    }
}
