use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

use crate::model::action::ActionMap;

#[derive(Debug, Serialize)]
pub struct ExtractReport {
    pub rows_total: usize,
    pub rows_kept: usize,
}

/// Varre o export e monta o mapa id -> nome.
///
/// Os exports de data-mining trazem linhas de cabeçalho (chaves, tipos,
/// defaults) espalhadas no topo; o discriminador é o primeiro campo ser
/// inteiro. A linha de defaults passa nesse filtro com id "0", e id de
/// action é sempre positivo, então zero também cai fora.
pub fn action_map(text: &str) -> Result<(ActionMap, ExtractReport), String> {
    let id_re = Regex::new(r"^[0-9]+$").unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut map: ActionMap = HashMap::new();
    let mut rows_total = 0usize;
    let mut rows_kept = 0usize;

    for record in reader.records() {
        let record = record.map_err(|e| format!("csv parse error: {e}"))?;
        rows_total += 1;

        if record.len() < 2 {
            continue;
        }

        let id = &record[0];
        if !id_re.is_match(id) {
            continue;
        }
        if id.bytes().all(|b| b == b'0') {
            continue;
        }

        let name = &record[1];
        if name.is_empty() {
            continue;
        }

        // Colunas extras existem no export e são ignoradas.
        // Última ocorrência de um id vence.
        map.insert(id.to_string(), name.to_string());
        rows_kept += 1;
    }

    Ok((map, ExtractReport { rows_total, rows_kept }))
}
