//! Client-side file downloads through a temporary object URL.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Report,
}

impl ExportFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Report => "text/plain;charset=utf-8",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Report => "txt",
        }
    }
}

fn js_error(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// `<prefix>_<subject>_<YYYYMMDD>.<ext>` with the subject lowercased and
/// runs of non-alphanumerics collapsed to one underscore.
pub fn export_file_name(
    prefix: &str,
    subject: &str,
    date: chrono::NaiveDate,
    format: ExportFormat,
) -> String {
    let mut slug = String::new();
    for c in subject.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_end_matches('_');

    let mut name = prefix.to_string();
    if !slug.is_empty() {
        name.push('_');
        name.push_str(slug);
    }
    format!("{}_{}.{}", name, date.format("%Y%m%d"), format.extension())
}

/// Offers `contents` to the user as a file called `file_name`.
pub fn download_text(file_name: &str, format: ExportFormat, contents: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = BlobPropertyBag::new();
    options.set_type(format.mime());
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "No document to attach the download to".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "Could not create download link".to_string())?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url).map_err(js_error)?;
    log::info!("Downloaded {} ({} bytes)", file_name, contents.len());
    Ok(())
}
