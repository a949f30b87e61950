use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Tabela pré-construída de conversão simplificado -> tradicional (variante
/// de Taiwan), carregada de um JSON plano { "frase": "frase" }. A tabela é
/// dado externo; aqui só se aplica.
pub struct ScriptTable {
    entries: HashMap<String, String>,
    max_key_chars: usize,
}

impl ScriptTable {
    pub fn new(entries: HashMap<String, String>) -> ScriptTable {
        let max_key_chars = entries.keys().map(|k| k.chars().count()).max().unwrap_or(1);

        ScriptTable {
            entries,
            max_key_chars,
        }
    }

    pub fn load(path: &Path) -> Result<ScriptTable, String> {
        let data = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        let entries: HashMap<String, String> = serde_json::from_str(&data)
            .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;

        if entries.is_empty() {
            return Err(format!("{} has no entries", path.display()));
        }

        Ok(ScriptTable::new(entries))
    }

    /// Varredura gulosa: em cada posição tenta a frase mais longa da tabela;
    /// caractere sem entrada passa inalterado.
    pub fn convert(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut i = 0usize;

        while i < chars.len() {
            let limit = self.max_key_chars.min(chars.len() - i);
            let mut advanced = 0usize;

            for len in (1..=limit).rev() {
                let candidate: String = chars[i..i + len].iter().collect();
                if let Some(replacement) = self.entries.get(&candidate) {
                    out.push_str(replacement);
                    advanced = len;
                    break;
                }
            }

            if advanced == 0 {
                out.push(chars[i]);
                advanced = 1;
            }

            i += advanced;
        }

        out
    }
}
