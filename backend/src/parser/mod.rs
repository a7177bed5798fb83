//! Semicolon-delimited CSV decoding into [`Record`]s.
//!
//! No quoting or escaping is supported: a `;` inside a value splits it.
//! Headers are normalized with [`normalize_header`] so that
//! `"Frente de Serviço"` and `"frente de servico"` style variations map to
//! stable keys.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{CsvError, CsvResult};
use crate::models::Record;

/// Field delimiter of the source file.
pub const DELIMITER: char = ';';

static NON_KEY_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^a-z0-9]").expect("static pattern"));

/// Result of decoding with metadata
#[derive(Debug, Clone)]
pub struct ParsedCsv {
    /// Decoded rows, in file order
    pub records: Vec<Record>,
    /// Normalized header keys, in column order
    pub headers: Vec<String>,
    /// Header cells as they appear in the file
    pub raw_headers: Vec<String>,
    /// Encoding used to turn bytes into text
    pub encoding: String,
}

/// Map a raw header cell to its canonical key.
///
/// Lowercases, then drops every character outside `[a-z0-9]`, including
/// accented letters and spaces. Idempotent.
pub fn normalize_header(raw: &str) -> String {
    let lower = raw.to_lowercase();
    NON_KEY_CHARS.replace_all(&lower, "").into_owned()
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let charset = chardet::detect(bytes).0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding.
///
/// A leading byte-order mark is removed. Unknown encodings fall back to
/// lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> CsvResult<String> {
    let codec = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => encoding_rs::UTF_8,
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::WINDOWS_1252,
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252,
        _ => return Ok(String::from_utf8_lossy(strip_bom(bytes)).into_owned()),
    };

    let (text, _, had_errors) = codec.decode(bytes);
    if had_errors && codec != encoding_rs::UTF_8 {
        return Err(CsvError::Encoding {
            encoding: encoding.to_string(),
        });
    }
    Ok(text.into_owned())
}

fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

/// Decode CSV text into records.
///
/// Blank lines are skipped, the first remaining line is the header row.
/// Short lines are padded with `""`, long lines lose their extra cells,
/// values are trimmed.
///
/// # Example
/// ```
/// use frentes::parser::decode_csv;
///
/// let rows = decode_csv("Contrato;Frente de Servico\nC1;F1\n").unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].get("frentedeservico"), "F1");
/// ```
pub fn decode_csv(text: &str) -> CsvResult<Vec<Record>> {
    decode_text(text, "utf-8".to_string()).map(|parsed| parsed.records)
}

/// Decode raw bytes: detect encoding, decode, then parse.
///
/// Valid UTF-8 is taken as such; chardet is only asked about other bytes.
pub fn parse_bytes(bytes: &[u8]) -> CsvResult<ParsedCsv> {
    let encoding = if std::str::from_utf8(strip_bom(bytes)).is_ok() {
        "utf-8".to_string()
    } else {
        detect_encoding(bytes)
    };
    let text = decode_content(bytes, &encoding)?;
    decode_text(&text, encoding)
}

/// Parse already-decoded text and keep the header metadata.
pub fn decode_text(text: &str, encoding: String) -> CsvResult<ParsedCsv> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(CsvError::EmptyFile)?;

    let raw_headers: Vec<String> = header_line
        .split(DELIMITER)
        .map(|cell| cell.trim().to_string())
        .collect();
    let headers: Vec<String> = raw_headers.iter().map(|h| normalize_header(h)).collect();

    let records = lines
        .map(|line| {
            let values: Vec<&str> = line.split(DELIMITER).collect();
            headers
                .iter()
                .enumerate()
                .map(|(i, key)| {
                    let value = values.get(i).map(|v| v.trim()).unwrap_or("");
                    (key.as_str(), value)
                })
                .collect::<Record>()
        })
        .collect();

    Ok(ParsedCsv {
        records,
        headers,
        raw_headers,
        encoding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents_and_punctuation() {
        assert_eq!(normalize_header("Extensao Edital (m)"), "extensaoeditalm");
        assert_eq!(normalize_header("  Previsão de Início "), "previsodeincio");
        assert_eq!(normalize_header("Contrato"), "contrato");
        assert_eq!(normalize_header(""), "");
        assert_eq!(normalize_header("!!!"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["Frente de Serviço", "STATUS - Civil", "a_b-c 1", "ÇÃO", ""] {
            let once = normalize_header(raw);
            assert_eq!(normalize_header(&once), once);
        }
    }

    #[test]
    fn test_simple_csv() {
        let csv = "Contrato;Coordenacao\nC1;Norte\nC2;Sul";
        let rows = decode_csv(csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].contract(), "C1");
        assert_eq!(rows[0].coordination(), "Norte");
        assert_eq!(rows[1].contract(), "C2");
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let csv = "a;b\r\n1;2\r\n\r\n   \n3;4\r\n";
        let rows = decode_csv(csv).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("b"), "2");
        assert_eq!(rows[1].get("a"), "3");
    }

    #[test]
    fn test_leading_blank_lines_before_header() {
        let rows = decode_csv("\n\nx;y\n1;2").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("x"), "1");
    }

    #[test]
    fn test_missing_values_padded() {
        let rows = decode_csv("a;b;c\n1").unwrap();

        assert_eq!(rows[0].get("a"), "1");
        assert_eq!(rows[0].get("b"), "");
        assert!(rows[0].contains_key("c"));
        assert_eq!(rows[0].get("c"), "");
    }

    #[test]
    fn test_extra_columns_dropped() {
        let rows = decode_csv("a;b\n1;2;3;4").unwrap();

        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].get("b"), "2");
    }

    #[test]
    fn test_values_trimmed() {
        let rows = decode_csv("a;b\n  x ;\ty\t").unwrap();
        assert_eq!(rows[0].get("a"), "x");
        assert_eq!(rows[0].get("b"), "y");
    }

    #[test]
    fn test_quotes_are_not_special() {
        let rows = decode_csv("a;b\n\"x;y\";z").unwrap();
        assert_eq!(rows[0].get("a"), "\"x");
        assert_eq!(rows[0].get("b"), "y\"");
    }

    #[test]
    fn test_header_only_gives_no_records() {
        let rows = decode_csv("a;b\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_csv_error() {
        assert!(matches!(decode_csv(""), Err(CsvError::EmptyFile)));
        assert!(matches!(decode_csv("\n \r\n"), Err(CsvError::EmptyFile)));
    }

    #[test]
    fn test_parse_bytes_keeps_headers() {
        let parsed = parse_bytes(b"Contrato;Frente de Servico\nC1;F1").unwrap();

        assert_eq!(parsed.headers, vec!["contrato", "frentedeservico"]);
        assert_eq!(parsed.raw_headers, vec!["Contrato", "Frente de Servico"]);
        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn test_utf8_bom_removed() {
        let parsed = parse_bytes(b"\xEF\xBB\xBFcontrato;escopo\nC1;Rede").unwrap();
        assert_eq!(parsed.headers[0], "contrato");
    }

    #[test]
    fn test_valid_utf8_is_not_redetected() {
        let parsed = parse_bytes("Coordenação;Escopo\nNorte;Adutora".as_bytes()).unwrap();
        assert_eq!(parsed.encoding, "utf-8");
        assert_eq!(parsed.raw_headers[0], "Coordenação");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Coordenação" in ISO-8859-1
        let bytes: &[u8] = &[0x43, 0x6F, 0x6F, 0x72, 0x64, 0x65, 0x6E, 0x61, 0xE7, 0xE3, 0x6F];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Coordenação");
    }
}
