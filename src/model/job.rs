use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocaleJob {
    pub locale: String,

    pub source_url: String,

    pub output_file: String,

    #[serde(default)]
    pub convert: bool,
}

fn default_out_dir() -> String {
    ".".to_string()
}

fn default_script_table() -> String {
    "s2twp.json".to_string()
}

fn default_jobs() -> Vec<LocaleJob> {
    vec![
        LocaleJob {
            locale: "en".to_string(),
            source_url:
                "https://raw.githubusercontent.com/xivapi/ffxiv-datamining/refs/heads/master/csv/Action.csv"
                    .to_string(),
            output_file: "actions_en.json".to_string(),
            convert: false,
        },
        LocaleJob {
            locale: "zh-tw".to_string(),
            source_url:
                "https://raw.githubusercontent.com/thewakingsands/ffxiv-datamining-cn/refs/heads/master/Action.csv"
                    .to_string(),
            output_file: "actions_zhtw.json".to_string(),
            convert: true,
        },
    ]
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RunConfig {
    #[serde(default = "default_jobs")]
    pub jobs: Vec<LocaleJob>,

    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_script_table")]
    pub script_table: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            jobs: default_jobs(),
            out_dir: default_out_dir(),
            script_table: default_script_table(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<RunConfig, String> {
        let data = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        serde_json::from_str(&data).map_err(|e| format!("invalid config {}: {e}", path.display()))
    }
}
