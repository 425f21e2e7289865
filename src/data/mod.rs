//! Data module - CSV loading and filtering

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError, NAME_COLUMN, PROFICIENCY_COLUMN, SKILL_COLUMN};
pub use processor::{DataProcessor, ProcessorError, SkillRecord, PROFICIENCY_RANGE};
