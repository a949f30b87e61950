use std::time::Duration;

use reqwest::blocking::Client;

const TIMEOUT_SECS: u64 = 60;

/// GET simples, sem retry nem cache: cada execução baixa tudo de novo.
pub fn get_bytes(url: &str) -> Result<Vec<u8>, String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECS))
        .build()
        .map_err(|e| e.to_string())?;

    let resp = client.get(url).send().map_err(|e| e.to_string())?;

    let status = resp.status();
    if !status.is_success() {
        return Err(format!("unexpected status {status} for {url}"));
    }

    let bytes = resp.bytes().map_err(|e| e.to_string())?;

    Ok(bytes.to_vec())
}
