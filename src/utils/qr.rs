use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;
use thiserror::Error;

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, Error)]
pub enum QrError {
    #[error("failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("failed to write QR image: {0}")]
    Image(#[from] image::ImageError),
}

/// Renders `text` as a QR code and returns it as a PNG data-URL.
pub fn png_data_url(text: &str) -> Result<String, QrError> {
    let code = QrCode::new(text.as_bytes())?;
    let image = code.render::<Luma<u8>>().build();

    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(image).write_to(&mut buffer, ImageFormat::Png)?;

    Ok(format!(
        "{}{}",
        PNG_DATA_URL_PREFIX,
        general_purpose::STANDARD.encode(buffer.get_ref())
    ))
}

/// Mercado Pago usually returns bare base64; anything already shaped as a
/// data-URL is left alone.
pub fn ensure_data_url(image_base64: String) -> String {
    if image_base64.starts_with("data:") {
        image_base64
    } else {
        format!("{}{}", PNG_DATA_URL_PREFIX, image_base64)
    }
}

#[cfg(test)]
pub(crate) fn scan_data_url(data_url: &str) -> String {
    let encoded = data_url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .expect("not a PNG data-URL");
    let bytes = general_purpose::STANDARD.decode(encoded).unwrap();
    let image = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
        .unwrap()
        .to_luma8();

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        image.width() as usize,
        image.height() as usize,
        |x, y| image.get_pixel(x as u32, y as u32).0[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR code");
    let (_, content) = grids[0].decode().unwrap();
    content
}
