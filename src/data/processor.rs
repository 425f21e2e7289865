//! Data Processor Module
//! Filters the skills table to one category and puts rows in plot order.

use crate::data::loader::{NAME_COLUMN, PROFICIENCY_COLUMN, SKILL_COLUMN};
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Documented proficiency scale.
pub const PROFICIENCY_RANGE: std::ops::RangeInclusive<f64> = 1.0..=10.0;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("No rows with Skill == '{0}'")]
    NoMatchingRows(String),
    #[error("Invalid {column} value in filtered row {row}")]
    InvalidValue { column: &'static str, row: usize },
}

/// One row of the skills dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRecord {
    pub skill: String,
    pub name: String,
    pub proficiency: f64,
}

/// Handles the filter and ordering steps.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep rows whose skill equals `skill`, in input order.
    ///
    /// Output columns: [Skill, Name (string), Proficiency (f64)]
    pub fn filter_by_skill(df: &DataFrame, skill: &str) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(SKILL_COLUMN).eq(lit(skill)))
            .select([
                col(SKILL_COLUMN),
                col(NAME_COLUMN).cast(DataType::String),
                col(PROFICIENCY_COLUMN).cast(DataType::Float64),
            ])
            .collect()?;
        Ok(filtered)
    }

    /// Reverse rows. Bars are stacked from the bottom up, so the reversed
    /// frame draws in dataset order top-to-bottom.
    pub fn plot_order(df: &DataFrame) -> DataFrame {
        df.reverse()
    }

    /// Extract records from a frame produced by [`Self::filter_by_skill`].
    pub fn records(df: &DataFrame) -> Result<Vec<SkillRecord>, ProcessorError> {
        let skills = df.column(SKILL_COLUMN)?.cast(&DataType::String)?;
        let names = df.column(NAME_COLUMN)?.cast(&DataType::String)?;
        let values = df.column(PROFICIENCY_COLUMN)?.cast(&DataType::Float64)?;

        let skills = skills.as_materialized_series().str()?;
        let names = names.as_materialized_series().str()?;
        let values = values.as_materialized_series().f64()?;

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let skill = skills.get(row).ok_or(ProcessorError::InvalidValue {
                column: SKILL_COLUMN,
                row,
            })?;
            let name = names.get(row).ok_or(ProcessorError::InvalidValue {
                column: NAME_COLUMN,
                row,
            })?;
            let proficiency = values
                .get(row)
                .filter(|v| v.is_finite())
                .ok_or(ProcessorError::InvalidValue {
                    column: PROFICIENCY_COLUMN,
                    row,
                })?;

            if !PROFICIENCY_RANGE.contains(&proficiency) {
                warn!(language = name, proficiency, "proficiency outside the 1-10 scale");
            }

            records.push(SkillRecord {
                skill: skill.to_string(),
                name: name.to_string(),
                proficiency,
            });
        }

        Ok(records)
    }

    /// Filter, reverse and extract. An empty selection is an error.
    pub fn prepare_records(
        df: &DataFrame,
        skill: &str,
    ) -> Result<Vec<SkillRecord>, ProcessorError> {
        let filtered = Self::filter_by_skill(df, skill)?;
        debug!(
            category = skill,
            kept = filtered.height(),
            dropped = df.height() - filtered.height(),
            "filtered skills table"
        );
        if filtered.height() == 0 {
            return Err(ProcessorError::NoMatchingRows(skill.to_string()));
        }

        let records = Self::records(&Self::plot_order(&filtered))?;
        debug!(
            records = %serde_json::to_string(&records).unwrap_or_default(),
            "records in plot order"
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANGS: &str = "Programming languages";

    fn skills_frame() -> DataFrame {
        polars::df!(
            SKILL_COLUMN => &[LANGS, "Other", LANGS, "Databases", LANGS],
            NAME_COLUMN => &["Python", "Guitar", "R", "SQL", "Rust"],
            PROFICIENCY_COLUMN => &[9i64, 5, 8, 7, 6],
        )
        .unwrap()
    }

    fn names(records: &[SkillRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_filter_keeps_only_category_in_order() {
        let filtered = DataProcessor::filter_by_skill(&skills_frame(), LANGS).unwrap();
        assert_eq!(filtered.height(), 3);

        let records = DataProcessor::records(&filtered).unwrap();
        assert!(records.iter().all(|r| r.skill == LANGS));
        assert_eq!(names(&records), vec!["Python", "R", "Rust"]);
    }

    #[test]
    fn test_plot_order_reverses() {
        let filtered = DataProcessor::filter_by_skill(&skills_frame(), LANGS).unwrap();
        let reversed = DataProcessor::plot_order(&filtered);
        let records = DataProcessor::records(&reversed).unwrap();
        assert_eq!(names(&records), vec!["Rust", "R", "Python"]);
    }

    #[test]
    fn test_prepare_records_single_match() {
        let df = polars::df!(
            SKILL_COLUMN => &[LANGS, "Other"],
            NAME_COLUMN => &["Python", "Guitar"],
            PROFICIENCY_COLUMN => &[9i64, 5],
        )
        .unwrap();
        let records = DataProcessor::prepare_records(&df, LANGS).unwrap();
        assert_eq!(
            records,
            vec![SkillRecord {
                skill: LANGS.to_string(),
                name: "Python".to_string(),
                proficiency: 9.0,
            }]
        );
    }

    #[test]
    fn test_no_matching_rows() {
        let df = polars::df!(
            SKILL_COLUMN => &["Other"],
            NAME_COLUMN => &["Guitar"],
            PROFICIENCY_COLUMN => &[5i64],
        )
        .unwrap();
        let err = DataProcessor::prepare_records(&df, LANGS).unwrap_err();
        assert!(matches!(err, ProcessorError::NoMatchingRows(ref s) if s == LANGS));
    }

    #[test]
    fn test_category_match_is_exact() {
        let df = polars::df!(
            SKILL_COLUMN => &["programming languages", "Programming languages ", LANGS],
            NAME_COLUMN => &["Lower", "Trailing", "Exact"],
            PROFICIENCY_COLUMN => &[1i64, 2, 3],
        )
        .unwrap();
        let records = DataProcessor::prepare_records(&df, LANGS).unwrap();
        assert_eq!(names(&records), vec!["Exact"]);
    }

    #[test]
    fn test_non_numeric_proficiency_rejected() {
        let df = polars::df!(
            SKILL_COLUMN => &[LANGS, LANGS],
            NAME_COLUMN => &["Python", "Go"],
            PROFICIENCY_COLUMN => &["9", "lots"],
        )
        .unwrap();
        let err = DataProcessor::prepare_records(&df, LANGS).unwrap_err();
        // Reversed order puts "Go" in row 0
        assert!(
            matches!(
                err,
                ProcessorError::InvalidValue { column: PROFICIENCY_COLUMN, row: 0 }
            ),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_records_serialize_to_json() {
        let df = polars::df!(
            SKILL_COLUMN => &[LANGS],
            NAME_COLUMN => &["Python"],
            PROFICIENCY_COLUMN => &[9i64],
        )
        .unwrap();
        let records = DataProcessor::prepare_records(&df, LANGS).unwrap();
        let json = serde_json::to_value(&records).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "skill": LANGS, "name": "Python", "proficiency": 9.0 }
            ])
        );
    }

    #[test]
    fn test_out_of_scale_values_are_kept() {
        let df = polars::df!(
            SKILL_COLUMN => &[LANGS],
            NAME_COLUMN => &["Fortran"],
            PROFICIENCY_COLUMN => &[12.5f64],
        )
        .unwrap();
        let records = DataProcessor::prepare_records(&df, LANGS).unwrap();
        assert_eq!(records[0].proficiency, 12.5);
    }
}
