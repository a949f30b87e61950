use crate::model::action::ActionMap;

/// Aplica a conversão de escrita valor a valor, sem tocar nas chaves.
/// Qualquer falha descarta a conversão inteira: nunca fica meio mapa
/// convertido para ser gravado.
pub fn apply<F>(map: &ActionMap, convert: F) -> Result<ActionMap, String>
where
    F: Fn(&str) -> Result<String, String>,
{
    let mut out = ActionMap::with_capacity(map.len());

    for (id, name) in map {
        let converted = convert(name).map_err(|e| format!("id {id}: {e}"))?;
        out.insert(id.clone(), converted);
    }

    Ok(out)
}
