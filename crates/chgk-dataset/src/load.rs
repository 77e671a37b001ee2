//! Reading pipeline inputs from JSON
//!
//! Two inputs feed the pipeline: the tournament catalog and the raw results.
//! Both are plain JSON objects keyed by tournament id. An optional
//! [`DatasetConfig`] can be read the same way.

use std::{fs::File, io::BufReader, path::Path};

use serde::de::DeserializeOwned;

use crate::{
    LoadError, config::DatasetConfig, results::RawResults, tournament::TournamentCatalog,
};

/// Read and parse a JSON file
///
/// `file_kind` only appears in error messages.
pub fn read_json_file<T, P>(file_kind: &'static str, path: P) -> Result<T, LoadError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        kind: file_kind,
        path: path.to_owned(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| LoadError::Parse {
        kind: file_kind,
        origin: path.display().to_string(),
        source,
    })
}

fn parse_json_str<T>(kind: &'static str, json: &str) -> Result<T, LoadError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(json).map_err(|source| LoadError::Parse {
        kind,
        origin: "string".to_owned(),
        source,
    })
}

pub fn read_tournaments_file<P>(path: P) -> Result<TournamentCatalog, LoadError>
where
    P: AsRef<Path>,
{
    let catalog: TournamentCatalog = read_json_file("tournaments", path)?;
    log::info!("loaded metadata for {} tournaments", catalog.len());
    Ok(catalog)
}

pub fn read_results_file<P>(path: P) -> Result<RawResults, LoadError>
where
    P: AsRef<Path>,
{
    let results: RawResults = read_json_file("results", path)?;
    log::info!("loaded results for {} tournaments", results.len());
    Ok(results)
}

pub fn read_config_file<P>(path: P) -> Result<DatasetConfig, LoadError>
where
    P: AsRef<Path>,
{
    read_json_file("config", path)
}

pub fn tournaments_from_str(json: &str) -> Result<TournamentCatalog, LoadError> {
    parse_json_str("tournaments", json)
}

pub fn results_from_str(json: &str) -> Result<RawResults, LoadError> {
    parse_json_str("results", json)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_parse_inputs_from_str() {
        let catalog = tournaments_from_str(
            r#"{"12": {"dateStart": "2019-10-01T10:00:00+03:00", "questionQty": {"1": 15, "2": 15}}}"#,
        )
        .unwrap();
        assert_eq!(catalog.get(12).unwrap().total_questions(), 30);

        let results = results_from_str(
            r#"{"12": [{"mask": "1", "teamMembers": [{"player": {"id": 3}}]}], "13": []}"#,
        )
        .unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results.team_results(12).unwrap()[0].players, vec![3]);
    }

    #[test]
    fn test_parse_error_names_input() {
        let err = tournaments_from_str("[1, 2]").unwrap_err();
        assert!(matches!(err, LoadError::Parse { kind: "tournaments", .. }));
        assert!(err.to_string().starts_with("failed to parse tournaments JSON"));
    }

    #[test]
    fn test_tournament_without_question_qty_fails_to_load() {
        let err = tournaments_from_str(r#"{"1": {"dateStart": "2019-01-01"}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse { kind: "tournaments", .. }));
        assert!(err.to_string().contains("missing field `questionQty`"));
    }

    #[test]
    fn test_read_files() {
        let dir = env::temp_dir().join(format!("chgk-dataset-load-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let config_path = dir.join("config.json");
        fs::write(&config_path, r#"{"question_id_base": 5}"#).unwrap();

        let config = read_config_file(&config_path).unwrap();
        assert_eq!(config.question_id_base, 5);
        assert!(!config.parallel);

        let missing = dir.join("missing.json");
        let err = read_results_file(&missing).unwrap_err();
        assert!(matches!(err, LoadError::Open { kind: "results", .. }));

        fs::remove_dir_all(&dir).unwrap();
    }
}
