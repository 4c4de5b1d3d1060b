use super::table::RowSet;

/// Case-insensitive substring match on institution name. Rows without a name never match.
pub fn by_institution<'a>(rows: &RowSet<'a>, needle: &str) -> RowSet<'a> {
    let needle = needle.trim().to_lowercase();
    rows.retain(|row| {
        !row.institution.is_empty() && row.institution.to_lowercase().contains(&needle)
    })
}

pub fn by_state<'a>(rows: &RowSet<'a>, state: &str) -> RowSet<'a> {
    rows.retain(|row| row.state == state)
}

pub fn by_states<'a, S: AsRef<str>>(rows: &RowSet<'a>, states: &[S]) -> RowSet<'a> {
    rows.retain(|row| states.iter().any(|state| state.as_ref() == row.state))
}

/// Exact match on course area; `None` passes every row through.
pub fn by_area<'a>(rows: &RowSet<'a>, area: Option<&str>) -> RowSet<'a> {
    match area {
        Some(area) => rows.retain(|row| row.area == area),
        None => rows.clone(),
    }
}

/// Case-insensitive substring match on administrative category.
pub fn by_category<'a>(rows: &RowSet<'a>, needle: &str) -> RowSet<'a> {
    let needle = needle.trim().to_lowercase();
    rows.retain(|row| row.category.to_lowercase().contains(&needle))
}

/// Optional course-area restriction shared by every analysis entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    area: Option<String>,
}

impl Scope {
    pub fn all() -> Self {
        Self { area: None }
    }

    pub fn area(area: impl Into<String>) -> Self {
        Self {
            area: Some(area.into()),
        }
    }

    /// Blank areas mean "no filter".
    pub fn from_optional(area: Option<&str>) -> Self {
        match area.map(str::trim) {
            Some(area) if !area.is_empty() => Self::area(area),
            _ => Self::all(),
        }
    }

    pub fn area_name(&self) -> Option<&str> {
        self.area.as_deref()
    }

    pub fn apply<'a>(&self, rows: &RowSet<'a>) -> RowSet<'a> {
        by_area(rows, self.area_name())
    }
}
