use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Questionnaire dimensions defined by INEP Nota Técnica nº 4/2023.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Dimension {
    #[serde(rename = "NOC")]
    Pedagogical,
    #[serde(rename = "NFC")]
    Infrastructure,
    #[serde(rename = "NAC")]
    Enrichment,
}

impl Dimension {
    pub const fn ordered() -> [Dimension; 3] {
        [
            Dimension::Pedagogical,
            Dimension::Infrastructure,
            Dimension::Enrichment,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Pedagogical => "NOC",
            Self::Infrastructure => "NFC",
            Self::Enrichment => "NAC",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pedagogical => "Organização Didático-Pedagógica",
            Self::Infrastructure => "Infraestrutura e Instalações Físicas",
            Self::Enrichment => "Oportunidades de Ampliação da Formação",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|dimension| dimension.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// Dimension a question belongs to, or `Unknown` for questions outside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionClass {
    Known(Dimension),
    Unknown,
}

impl QuestionClass {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Known(dimension) => dimension.code(),
            Self::Unknown => "unknown",
        }
    }

    pub const fn dimension(self) -> Option<Dimension> {
        match self {
            Self::Known(dimension) => Some(dimension),
            Self::Unknown => None,
        }
    }
}

impl Serialize for QuestionClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("question {question} is assigned to both {first} and {second}")]
    Overlap {
        question: String,
        first: &'static str,
        second: &'static str,
    },
}

/// Fixed mapping from each dimension to its ordered question identifiers.
#[derive(Debug, Clone)]
pub struct DimensionRegistry {
    questions: [(Dimension, Vec<String>); 3],
    index: HashMap<String, Dimension>,
}

const PEDAGOGICAL_QUESTIONS: [&str; 13] = [
    "Q27", "Q29", "Q30", "Q31", "Q33", "Q34", "Q35", "Q36", "Q37", "Q38", "Q42", "Q49", "Q56",
];
const INFRASTRUCTURE_QUESTIONS: [&str; 11] = [
    "Q55", "Q58", "Q59", "Q60", "Q61", "Q62", "Q63", "Q64", "Q65", "Q66", "Q68",
];
const ENRICHMENT_QUESTIONS: [&str; 8] = ["Q43", "Q44", "Q45", "Q46", "Q47", "Q52", "Q53", "Q67"];

impl DimensionRegistry {
    /// Question membership published for the ENADE student questionnaire.
    pub fn standard() -> Self {
        Self::new(
            &PEDAGOGICAL_QUESTIONS,
            &INFRASTRUCTURE_QUESTIONS,
            &ENRICHMENT_QUESTIONS,
        )
        .expect("standard registry question sets are disjoint")
    }

    pub fn new(
        pedagogical: &[&str],
        infrastructure: &[&str],
        enrichment: &[&str],
    ) -> Result<Self, RegistryError> {
        let questions = [
            (Dimension::Pedagogical, owned(pedagogical)),
            (Dimension::Infrastructure, owned(infrastructure)),
            (Dimension::Enrichment, owned(enrichment)),
        ];

        let mut index = HashMap::new();
        for (dimension, ids) in &questions {
            for id in ids {
                if let Some(existing) = index.insert(id.clone(), *dimension) {
                    return Err(RegistryError::Overlap {
                        question: id.clone(),
                        first: existing.code(),
                        second: dimension.code(),
                    });
                }
            }
        }

        Ok(Self { questions, index })
    }

    pub fn questions(&self, dimension: Dimension) -> &[String] {
        self.questions
            .iter()
            .find(|(candidate, _)| *candidate == dimension)
            .map(|(_, ids)| ids.as_slice())
            .unwrap_or_default()
    }

    /// Every registered question, dimension by dimension in registry order.
    pub fn all_questions(&self) -> impl Iterator<Item = &str> + '_ {
        self.questions
            .iter()
            .flat_map(|(_, ids)| ids.iter().map(String::as_str))
    }

    pub fn classify(&self, question: &str) -> QuestionClass {
        self.index
            .get(question)
            .copied()
            .map(QuestionClass::Known)
            .unwrap_or(QuestionClass::Unknown)
    }
}

impl Default for DimensionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}
