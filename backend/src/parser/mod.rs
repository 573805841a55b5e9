//! Delimited text to matrix and back.
//!
//! [`parse`] and [`serialize`] are the plain newline/comma convention with no
//! quoting, escaping or trimming. Byte input from files or uploads goes
//! through [`decode_bytes`] first, which detects the text encoding.

use std::path::Path;

use crate::error::{InputError, InputResult};
use crate::models::Matrix;

/// Row separator.
pub const ROW_DELIMITER: char = '\n';

/// Cell separator.
pub const CELL_DELIMITER: char = ',';

/// Split text into rows on `\n`, then each row into cells on `,`.
///
/// A trailing newline produces a trailing row holding one empty cell, and
/// the empty string parses to `[[""]]`.
///
/// # Example
/// ```
/// let matrix = tabulate::parse("A,B\nC,D");
/// assert_eq!(matrix, vec![vec!["A", "B"], vec!["C", "D"]]);
/// ```
pub fn parse(text: &str) -> Matrix {
    text.split(ROW_DELIMITER)
        .map(|line| line.split(CELL_DELIMITER).map(str::to_string).collect())
        .collect()
}

/// Join cells with `,` and rows with `\n`.
pub fn serialize(matrix: &[Vec<String>]) -> String {
    matrix
        .iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turn `\r\n` into `\n` and drop trailing line breaks.
///
/// Used before reading uploaded files as records, where a final newline
/// would otherwise become an empty record.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end_matches('\n').to_string()
}

/// Text decoded from raw bytes, with the encoding that was used.
#[derive(Debug, Clone)]
pub struct DecodedInput {
    pub text: String,
    pub encoding: String,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Unknown encodings fall back to lossy UTF-8.
pub fn decode_content(bytes: &[u8], encoding: &str) -> InputResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => String::from_utf8_lossy(bytes).to_string(),
        },
        "iso-8859-1" | "latin-1" | "latin1" => decode_with(encoding_rs::ISO_8859_15, bytes, encoding)?,
        "windows-1252" | "cp1252" => decode_with(encoding_rs::WINDOWS_1252, bytes, encoding)?,
        _ => String::from_utf8_lossy(bytes).to_string(),
    };

    // A UTF-8 byte order mark would otherwise end up in the first cell.
    Ok(decoded
        .strip_prefix('\u{feff}')
        .map(str::to_string)
        .unwrap_or(decoded))
}

fn decode_with(
    codec: &'static encoding_rs::Encoding,
    bytes: &[u8],
    encoding: &str,
) -> InputResult<String> {
    let (text, _, had_errors) = codec.decode(bytes);
    if had_errors {
        return Err(InputError::EncodingError {
            encoding: encoding.to_string(),
        });
    }
    Ok(text.into_owned())
}

/// Detect the encoding of `bytes` and decode them.
pub fn decode_bytes(bytes: &[u8]) -> InputResult<DecodedInput> {
    let encoding = detect_encoding(bytes);
    let text = decode_content(bytes, &encoding)?;
    Ok(DecodedInput { text, encoding })
}

/// Read a file and decode it with encoding detection.
pub async fn read_input<P: AsRef<Path>>(path: P) -> InputResult<DecodedInput> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    decode_bytes(&bytes)
}
