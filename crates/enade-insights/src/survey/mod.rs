pub mod dimension;
pub mod filter;
mod loader;
pub mod table;

pub use dimension::{Dimension, DimensionRegistry, QuestionClass, RegistryError};
pub use filter::Scope;
pub use loader::{DatasetError, SurveyLoader};
pub use table::{RowSet, SurveyRow, SurveyTable};
