mod columns;
mod parser;

use super::table::{SurveyRow, SurveyTable};
use columns::ColumnLayout;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read questionnaire export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid questionnaire CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("questionnaire export is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("line {line}: column '{column}' holds non-numeric value '{value}'")]
    InvalidNumber {
        line: u64,
        column: String,
        value: String,
    },
}

/// Loads the questionnaire summary (the spreadsheet exported as CSV).
pub struct SurveyLoader;

impl SurveyLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SurveyTable, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(file)?;
        info!(path = %path.display(), rows = table.len(), "questionnaire dataset loaded");
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<SurveyTable, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let layout = ColumnLayout::resolve(&headers).map_err(DatasetError::MissingColumn)?;
        debug!(questions = layout.questions.len(), "resolved questionnaire columns");

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(parse_row(&record, &layout, &headers)?);
        }

        Ok(SurveyTable::new(rows))
    }
}

fn parse_row(
    record: &csv::StringRecord,
    layout: &ColumnLayout,
    headers: &csv::StringRecord,
) -> Result<SurveyRow, DatasetError> {
    let line = record.position().map(|pos| pos.line()).unwrap_or_default();
    let cell = |index: usize| record.get(index).unwrap_or("");
    let invalid = |index: usize| DatasetError::InvalidNumber {
        line,
        column: headers.get(index).unwrap_or("?").to_string(),
        value: cell(index).to_string(),
    };
    let decimal = |index: Option<usize>| -> Result<Option<f64>, DatasetError> {
        match index {
            Some(index) => parser::parse_decimal(cell(index)).map_err(|_| invalid(index)),
            None => Ok(None),
        }
    };

    let participants = match layout.participants {
        Some(index) => parser::parse_count(cell(index)).map_err(|_| invalid(index))?,
        None => None,
    };

    let mut scores = BTreeMap::new();
    for (question, index) in &layout.questions {
        scores.insert(question.clone(), decimal(Some(*index))?);
    }

    Ok(SurveyRow {
        institution: parser::parse_text(cell(layout.institution)).unwrap_or_default(),
        state: cell(layout.state).trim().to_ascii_uppercase(),
        area: cell(layout.area).trim().to_string(),
        category: layout
            .category
            .and_then(|index| parser::parse_text(cell(index)))
            .unwrap_or_default(),
        course_code: layout
            .course_code
            .and_then(|index| parser::parse_text(cell(index)))
            .map(|code| code.trim_end_matches(".0").to_string()),
        overall_mean: decimal(layout.overall_mean)?,
        participants,
        participation_pct: decimal(layout.participation_pct)?,
        scores,
    })
}
