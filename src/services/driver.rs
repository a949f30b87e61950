use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::model::job::{LocaleJob, RunConfig};
use crate::services::{convert, encoding, extract, fetch, output, zhconv};

#[derive(Debug)]
pub enum JobError {
    Network(String),
    Decode(String),
    Parse(String),
    Convert(String),
    Write(String),
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::Network(msg) => write!(f, "network: {msg}"),
            JobError::Decode(msg) => write!(f, "decode: {msg}"),
            JobError::Parse(msg) => write!(f, "parse: {msg}"),
            JobError::Convert(msg) => write!(f, "convert: {msg}"),
            JobError::Write(msg) => write!(f, "write: {msg}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobOutcome {
    pub locale: String,
    pub ok: bool,
    pub actions: usize,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub succeeded: usize,
    pub failed: usize,
    pub jobs: Vec<JobOutcome>,
}

pub fn run(cfg: &RunConfig) -> RunReport {
    run_with_fetch(cfg, fetch::get_bytes)
}

/// Fan-out sequencial sobre os jobs. Job que falha é registrado e os
/// seguintes ainda rodam; quem decide o exit status é o chamador, olhando
/// o `failed` do relatório.
pub fn run_with_fetch<F>(cfg: &RunConfig, fetch: F) -> RunReport
where
    F: Fn(&str) -> Result<Vec<u8>, String>,
{
    // Tabela carregada uma vez; falha aqui só derruba os jobs que convertem.
    let table = if cfg.jobs.iter().any(|j| j.convert) {
        Some(zhconv::ScriptTable::load(Path::new(&cfg.script_table)))
    } else {
        None
    };

    let mut jobs: Vec<JobOutcome> = Vec::with_capacity(cfg.jobs.len());
    let mut succeeded = 0usize;
    let mut failed = 0usize;

    for job in &cfg.jobs {
        match run_job(job, &cfg.out_dir, &fetch, table.as_ref()) {
            Ok(actions) => {
                succeeded += 1;
                jobs.push(JobOutcome {
                    locale: job.locale.clone(),
                    ok: true,
                    actions,
                    error: None,
                });
            }
            Err(e) => {
                eprintln!("[{}] {e}", job.locale);
                failed += 1;
                jobs.push(JobOutcome {
                    locale: job.locale.clone(),
                    ok: false,
                    actions: 0,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    RunReport {
        succeeded,
        failed,
        jobs,
    }
}

fn run_job<F>(
    job: &LocaleJob,
    out_dir: &str,
    fetch: &F,
    table: Option<&Result<zhconv::ScriptTable, String>>,
) -> Result<usize, JobError>
where
    F: Fn(&str) -> Result<Vec<u8>, String>,
{
    println!("[{}] downloading {}", job.locale, job.source_url);

    let bytes = fetch(&job.source_url).map_err(JobError::Network)?;
    let text = encoding::decode_utf8(&bytes).map_err(JobError::Decode)?;
    let (map, report) = extract::action_map(&text).map_err(JobError::Parse)?;

    println!(
        "[{}] kept {} of {} rows",
        job.locale, report.rows_kept, report.rows_total
    );

    let map = if job.convert {
        let table = match table {
            Some(Ok(t)) => t,
            Some(Err(e)) => return Err(JobError::Convert(e.clone())),
            None => return Err(JobError::Convert("script table not loaded".to_string())),
        };

        convert::apply(&map, |name| Ok(table.convert(name))).map_err(JobError::Convert)?
    } else {
        map
    };

    let path = PathBuf::from(out_dir).join(&job.output_file);
    output::write_map(&path, &map).map_err(JobError::Write)?;

    println!(
        "[{}] wrote {} actions to {}",
        job.locale,
        map.len(),
        path.display()
    );

    Ok(map.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::action::ActionMap;
    use std::env;
    use std::fs;

    fn job(locale: &str, url: &str, file: &str, convert: bool) -> LocaleJob {
        LocaleJob {
            locale: locale.to_string(),
            source_url: url.to_string(),
            output_file: file.to_string(),
            convert,
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        env::temp_dir().join(format!(
            "castbar-datagen-driver-{}-{name}",
            std::process::id()
        ))
    }

    fn cfg_in(dir: &Path, jobs: Vec<LocaleJob>, script_table: &str) -> RunConfig {
        RunConfig {
            jobs,
            out_dir: dir.to_string_lossy().into_owned(),
            script_table: script_table.to_string(),
        }
    }

    #[test]
    fn failed_fetch_does_not_stop_later_jobs() {
        let dir = temp_dir("fanout");
        let cfg = cfg_in(
            &dir,
            vec![
                job("en", "http://one/Action.csv", "one.json", false),
                job("ja", "http://two/Action.csv", "two.json", false),
            ],
            "unused.json",
        );

        let report = run_with_fetch(&cfg, |url| {
            if url == "http://one/Action.csv" {
                Err("connection refused".to_string())
            } else {
                Ok(b"Key,Name\n12,Fire\n".to_vec())
            }
        });

        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 1);
        assert!(!report.jobs[0].ok);
        assert!(report.jobs[0]
            .error
            .as_deref()
            .unwrap()
            .starts_with("network:"));
        assert!(!dir.join("one.json").exists());

        let parsed: ActionMap =
            serde_json::from_str(&fs::read_to_string(dir.join("two.json")).unwrap()).unwrap();
        assert_eq!(parsed.get("12").map(String::as_str), Some("Fire"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_payload_is_a_decode_failure() {
        let dir = temp_dir("decode");
        let cfg = cfg_in(
            &dir,
            vec![job("en", "http://one/Action.csv", "one.json", false)],
            "unused.json",
        );

        let report = run_with_fetch(&cfg, |_| Ok(vec![0xFF, 0xFE, 0x80]));

        assert_eq!(report.failed, 1);
        assert!(report.jobs[0]
            .error
            .as_deref()
            .unwrap()
            .starts_with("decode:"));
        assert!(!dir.join("one.json").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_script_table_fails_only_convert_jobs() {
        let dir = temp_dir("no-table");
        let cfg = cfg_in(
            &dir,
            vec![
                job("zh-tw", "http://cn/Action.csv", "zhtw.json", true),
                job("en", "http://en/Action.csv", "en.json", false),
            ],
            "/nonexistent/s2twp.json",
        );

        let report = run_with_fetch(&cfg, |_| Ok(b"Key,Name\n12,Fire\n".to_vec()));

        assert_eq!(report.failed, 1);
        assert_eq!(report.succeeded, 1);
        assert!(report.jobs[0]
            .error
            .as_deref()
            .unwrap()
            .starts_with("convert:"));
        assert!(!dir.join("zhtw.json").exists());
        assert!(dir.join("en.json").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn convert_job_writes_converted_names() {
        let dir = temp_dir("convert");
        fs::create_dir_all(&dir).unwrap();

        let table_path = dir.join("s2twp.json");
        fs::write(&table_path, r#"{"发":"發"}"#).unwrap();

        let cfg = cfg_in(
            &dir,
            vec![job("zh-tw", "http://cn/Action.csv", "zhtw.json", true)],
            &table_path.to_string_lossy(),
        );

        let report = run_with_fetch(&cfg, |_| Ok("Key,Name\n1,出发\n".as_bytes().to_vec()));

        assert_eq!(report.failed, 0);
        assert_eq!(report.jobs[0].actions, 1);

        let parsed: ActionMap =
            serde_json::from_str(&fs::read_to_string(dir.join("zhtw.json")).unwrap()).unwrap();
        assert_eq!(parsed.get("1").map(String::as_str), Some("出發"));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn job_error_display_names_the_stage() {
        let e = JobError::Network("timeout".to_string());
        assert_eq!(e.to_string(), "network: timeout");
    }
}
