use std::collections::HashMap;

/// Mapa id -> nome exibido. Serializa como objeto JSON plano,
/// sem metadados, do jeito que o plugin consome.
pub type ActionMap = HashMap<String, String>;
