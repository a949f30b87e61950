use encoding_rs::UTF_8;

/// Decodificação estrita: byte inválido derruba o job inteiro,
/// nunca sai U+FFFD no arquivo gerado.
pub fn decode_utf8(bytes: &[u8]) -> Result<String, String> {
    // BOM UTF-8 (EF BB BF)
    let body = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &bytes[3..]
    } else {
        bytes
    };

    match UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        Some(text) => Ok(text.into_owned()),
        None => Err("payload is not valid utf-8".to_string()),
    }
}
