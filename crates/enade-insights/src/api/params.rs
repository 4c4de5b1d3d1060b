use crate::error::RequestError;
use serde::Deserialize;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 500;

/// Query string shared by every endpoint; each handler reads the fields it needs.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct InsightsQuery {
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub institutions: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl InsightsQuery {
    pub fn area(&self) -> Option<&str> {
        non_blank(self.area.as_deref())
    }

    pub fn required_area(&self) -> Result<&str, RequestError> {
        self.area().ok_or(RequestError::MissingParameter("area"))
    }

    pub fn required_question(&self) -> Result<String, RequestError> {
        non_blank(self.question.as_deref())
            .map(|question| question.to_ascii_uppercase())
            .ok_or(RequestError::MissingParameter("question"))
    }

    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Comma separated institution needles, blanks dropped.
    pub fn institutions(&self) -> Result<Vec<String>, RequestError> {
        let needles: Vec<String> = self
            .institutions
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_string)
            .collect();

        if needles.is_empty() {
            Err(RequestError::MissingParameter("institutions"))
        } else {
            Ok(needles)
        }
    }

    pub fn limit(&self) -> Result<usize, RequestError> {
        let Some(raw) = non_blank(self.limit.as_deref()) else {
            return Ok(DEFAULT_LIMIT);
        };

        match raw.parse::<usize>() {
            Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => Ok(limit),
            _ => Err(RequestError::InvalidParameter {
                name: "limit",
                reason: format!("expected an integer between 1 and {MAX_LIMIT}, got '{raw}'"),
            }),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
