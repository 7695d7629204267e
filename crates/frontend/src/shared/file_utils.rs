//! Reading picked files for upload.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use contracts::shared::ApiError;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

const SPREADSHEET_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// A picked file ready to be posted as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFile {
    pub name: String,
    /// Base64 of the raw bytes
    pub content: String,
}

/// First file of an `<input type="file">` change event.
pub fn selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input = ev
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())?;
    input.files()?.get(0)
}

pub fn is_spreadsheet(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Read a spreadsheet into memory and base64-encode it.
pub async fn read_spreadsheet(file: web_sys::File) -> Result<EncodedFile, ApiError> {
    let name = file.name();
    if !is_spreadsheet(&name) {
        return Err(ApiError::Validation(format!(
            "{} is not a spreadsheet (.xlsx, .xls or .csv)",
            name
        )));
    }

    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read {}: {:?}", name, e)))?;
    let uint8_array = js_sys::Uint8Array::new(&array_buffer);
    let mut bytes = vec![0; uint8_array.length() as usize];
    uint8_array.copy_to(&mut bytes);

    log::debug!("Read {} ({} bytes)", name, bytes.len());
    Ok(EncodedFile {
        name,
        content: encode_base64(&bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_spreadsheet() {
        assert!(is_spreadsheet("prices.xlsx"));
        assert!(is_spreadsheet("Sales.CSV"));
        assert!(!is_spreadsheet("notes.txt"));
        assert!(!is_spreadsheet("xlsx"));
    }

    #[test]
    fn test_encode_base64() {
        assert_eq!(encode_base64(b"PK\x03\x04"), "UEsDBA==");
    }
}
