use crate::error::ExportError;

/// Hands the encoded drawing to the user: a file in the working directory on
/// native, a browser download on the web.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_png(png: &[u8], file_name: &str) -> Result<(), ExportError> {
    std::fs::write(file_name, png).map_err(|source| ExportError::Io {
        path: file_name.to_owned(),
        source,
    })?;
    log::info!("Saved drawing to {} ({} bytes)", file_name, png.len());
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn save_png(png: &[u8], file_name: &str) -> Result<(), ExportError> {
    use eframe::wasm_bindgen::JsCast as _;
    use web_sys::js_sys::{Array, Uint8Array};

    let web_err = |err: eframe::wasm_bindgen::JsValue| ExportError::Web(format!("{err:?}"));

    let window = web_sys::window().ok_or_else(|| ExportError::Web("no window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| ExportError::Web("no document".to_owned()))?;

    let parts = Array::of1(&Uint8Array::from(png));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(web_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(web_err)?;

    let link = document
        .create_element("a")
        .map_err(web_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Web("created element is not an anchor".to_owned()))?;
    link.set_href(&url);
    link.set_download(file_name);
    link.click();
    web_sys::Url::revoke_object_url(&url).map_err(web_err)?;

    log::info!("Started download of {} ({} bytes)", file_name, png.len());
    Ok(())
}
