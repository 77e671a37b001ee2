//! Settings for dataset construction
//!
//! Configuration is read from JSON by [`crate::load::read_config_file`].

use serde::{Deserialize, Serialize};

use crate::QuestionId;

/// Dataset construction settings
///
/// Every field has a default, so a partial (or empty) JSON object is a
/// valid configuration:
///
/// ```
/// use chgk_dataset::config::DatasetConfig;
///
/// let config: DatasetConfig = serde_json::from_str(r#"{"parallel": true}"#).unwrap();
/// assert!(config.parallel);
/// assert_eq!(config.question_id_base, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Question id given to the first question of the first training
    /// tournament; later questions count up from here
    pub question_id_base: QuestionId,
    /// Question id used for every test-time row
    pub test_question_id: QuestionId,
    /// Expand tournaments on the rayon thread pool
    pub parallel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config: DatasetConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DatasetConfig::default());
        assert_eq!(config.test_question_id, 0);
        assert!(!config.parallel);
    }
}
