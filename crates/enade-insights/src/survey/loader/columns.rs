use std::collections::HashMap;

pub(crate) const INSTITUTION: &str = "Nome da IES";
pub(crate) const STATE: &str = "Sigla da UF";
pub(crate) const AREA: &str = "Área de Avaliação";
pub(crate) const CATEGORY: &str = "Categoria Administrativa";
pub(crate) const OVERALL_MEAN: &str = "Média";
pub(crate) const PARTICIPANTS: &str = "Nº  de Concluintes Participantes";
pub(crate) const PARTICIPATION_PCT: &str = "Percentual Participantes";
pub(crate) const COURSE_CODE: &str = "CO_CURSO";

pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_lowercase()
}

/// `Q27`, `q 27` and `Q027` all name question `Q27`.
pub(crate) fn question_id(header: &str) -> Option<String> {
    let normalized = normalize_header(header).replace(' ', "");
    let digits = normalized.strip_prefix('q')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let number: u32 = digits.parse().ok()?;
    Some(format!("Q{number}"))
}

/// Header positions resolved once per file.
#[derive(Debug)]
pub(crate) struct ColumnLayout {
    pub(crate) institution: usize,
    pub(crate) state: usize,
    pub(crate) area: usize,
    pub(crate) category: Option<usize>,
    pub(crate) overall_mean: Option<usize>,
    pub(crate) participants: Option<usize>,
    pub(crate) participation_pct: Option<usize>,
    pub(crate) course_code: Option<usize>,
    pub(crate) questions: Vec<(String, usize)>,
}

impl ColumnLayout {
    pub(crate) fn resolve(headers: &csv::StringRecord) -> Result<Self, &'static str> {
        let positions: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(index, header)| (normalize_header(header), index))
            .collect();
        let find = |name: &str| positions.get(&normalize_header(name)).copied();
        let require = |name: &'static str| find(name).ok_or(name);

        let questions = headers
            .iter()
            .enumerate()
            .filter_map(|(index, header)| question_id(header).map(|id| (id, index)))
            .collect();

        Ok(Self {
            institution: require(INSTITUTION)?,
            state: require(STATE)?,
            area: require(AREA)?,
            category: find(CATEGORY),
            overall_mean: find(OVERALL_MEAN),
            participants: find(PARTICIPANTS),
            participation_pct: find(PARTICIPATION_PCT),
            course_code: find(COURSE_CODE),
            questions,
        })
    }
}
