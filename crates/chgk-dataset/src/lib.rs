//! Player-question datasets from quiz tournament results
//!
//! This crate turns nested tournament results into flat rows for a per-player
//! skill model: one row per (player, question) pair, labeled with whether the
//! player's team answered the question correctly.
//!
//! # Overview
//!
//! The pipeline runs in the following order:
//!
//! 1. **Select Tournaments** ([`tournament::TournamentCatalog`]): Pick ids by date prefix or range
//! 2. **Normalize Results** ([`normalize::TourData`]): Keep the rosters and masks of each tournament
//! 3. **Decode Masks** ([`mask::DecodedMask`]): Turn mask strings into binary answers
//! 4. **Expand Rows** ([`expand`]): One row per player per question, train or test path
//! 5. **Assemble** ([`matrix::BatchStacker`]): Stack per-tournament batches into one matrix
//!
//! [`dataset::TrainDatasetBuilder`] and [`dataset::TestDataset`] run steps 4
//! and 5 over whole seasons.
//!
//! # Output
//!
//! The feature matrix has two integer columns, `[player_id, question_id]`,
//! and the label vector holds `0`/`1`. Rows are ordered by tournament, team,
//! player, then question. Categorical encoding is left to the consumer.
//!
//! # Example
//!
//! ```
//! use chgk_dataset::{
//!     config::DatasetConfig,
//!     dataset::{TestDataset, TrainDatasetBuilder},
//!     load,
//!     normalize::TourData,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let catalog = load::tournaments_from_str(
//!     r#"{
//!         "1": {"dateStart": "2019-04-06T12:00:00+03:00", "questionQty": {"1": 2, "2": 1}},
//!         "2": {"dateStart": "2020-02-01T12:00:00+03:00", "questionQty": {"1": 3}}
//!     }"#,
//! )?;
//! let results = load::results_from_str(
//!     r#"{
//!         "1": [
//!             {"mask": "01X1", "teamMembers": [{"player": {"id": 10}}, {"player": {"id": 11}}]},
//!             {"mask": "01", "teamMembers": [{"player": {"id": 12}}]},
//!             {"teamMembers": [{"player": {"id": 13}}]}
//!         ],
//!         "2": [
//!             {"mask": "110", "teamMembers": [{"player": {"id": 10}}, {"player": {"id": 99}}]}
//!         ]
//!     }"#,
//! )?;
//!
//! let config = DatasetConfig::default();
//!
//! // Train on 2019
//! let train_ids = catalog.ids_by_date_prefix("2019");
//! let train_tours = TourData::from_raw_many(&train_ids, &results, &catalog)?;
//! let train = TrainDatasetBuilder::new(config.clone()).build(&train_tours)?;
//! assert_eq!(train.batch.features().shape(), (6, 2));
//!
//! // Score 2020, keeping only players seen in training
//! let test_ids = catalog.ids_by_date_prefix("2020");
//! let test_tours = TourData::from_raw_many(&test_ids, &results, &catalog)?;
//! let test = TestDataset::build(&test_tours, &config, &train.players);
//! assert_eq!(test.stacked()?.len(), 3);
//! # Ok(())
//! # }
//! ```

pub use self::error::{DatasetError, LoadError};

pub mod config;
pub mod dataset;
mod error;
pub mod expand;
pub mod load;
pub mod mask;
pub mod matrix;
pub mod normalize;
pub mod question;
pub mod results;
pub mod roster;
pub mod tournament;

pub type TournamentId = u64;
pub type PlayerId = u64;
pub type QuestionId = u64;
