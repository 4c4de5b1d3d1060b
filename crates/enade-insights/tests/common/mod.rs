#![allow(dead_code)]

use enade_insights::analysis::Benchmark;
use enade_insights::survey::{SurveyLoader, SurveyTable};
use std::io::Cursor;

/// Small slice of the questionnaire export covering two areas and three states.
pub const QUESTIONNAIRE_CSV: &str = "CO_CURSO,Nome da IES,Sigla da UF,Área de Avaliação,Categoria Administrativa,Nº  de Concluintes Participantes,Percentual Participantes,Média,Q27,Q29,Q55,Q58,Q43,Q67\n\
101,UNIVERSIDADE DE FORTALEZA,CE,DIREITO,Privada sem fins lucrativos,150,80.5,4.60,4.2,4.8,5.0,4.9,3.9,\n\
102,UNIVERSIDADE DE FORTALEZA,CE,MEDICINA,Privada sem fins lucrativos,90,95.0,5.10,5.3,5.2,5.4,,4.8,4.9\n\
201,UNIVERSIDADE FEDERAL DO CEARÁ,CE,DIREITO,Pública Federal,120,70.0,4.80,4.9,4.7,4.1,4.0,4.6,4.4\n\
301,FACULDADE DO RECIFE,PE,DIREITO,Privada com fins lucrativos,60,55.0,4.10,3.8,4.0,4.5,4.4,3.7,3.5\n\
401,UNIVERSIDADE DE SÃO PAULO,SP,DIREITO,Pública Estadual,200,65.0,5.00,5.2,5.1,4.3,4.2,5.0,5.1\n\
402,CENTRO UNIVERSITÁRIO PAULISTA,SP,MEDICINA,Privada com fins lucrativos,40,60.0,4.40,4.5,4.6,4.7,4.8,4.1,\n";

pub fn table() -> SurveyTable {
    SurveyLoader::from_reader(Cursor::new(QUESTIONNAIRE_CSV)).expect("fixture loads")
}

pub fn benchmark() -> Benchmark {
    Benchmark {
        institution: "universidade de fortaleza".to_string(),
        state: "CE".to_string(),
        region: ["AL", "BA", "CE", "MA", "PB", "PE", "PI", "RN", "SE"]
            .iter()
            .map(|state| state.to_string())
            .collect(),
    }
}
