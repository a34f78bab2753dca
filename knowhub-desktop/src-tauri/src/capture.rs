//! Primary-screen capture for the `captureScreenshot` bridge operation.

use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbaImage};
use xcap::Monitor;

/// Largest thumbnail handed to the UI.
pub const MAX_CAPTURE_WIDTH: u32 = 1920;
pub const MAX_CAPTURE_HEIGHT: u32 = 1080;

/// Captures the primary monitor as a PNG data URL.
///
/// Returns `None` when no capture source is available or anything fails.
pub fn capture_primary_screen() -> Option<String> {
    match try_capture() {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("screen capture unavailable: {e}");
            None
        }
    }
}

fn try_capture() -> Result<String, Box<dyn std::error::Error>> {
    let monitors = Monitor::all()?;
    let monitor = monitors
        .iter()
        .find(|m| m.is_primary().unwrap_or(false))
        .or_else(|| monitors.first())
        .ok_or("no monitor to capture")?;

    let image = monitor.capture_image()?;
    let (width, height) =
        fit_within(image.width(), image.height(), MAX_CAPTURE_WIDTH, MAX_CAPTURE_HEIGHT);
    let image = if (width, height) == (image.width(), image.height()) {
        image
    } else {
        image::imageops::resize(&image, width, height, image::imageops::FilterType::Triangle)
    };

    let png = encode_png(&image)?;
    log::debug!("captured {width}x{height} screenshot ({} bytes)", png.len());
    Ok(png_data_url(&png))
}

/// Scales `(width, height)` down to fit the box, keeping the aspect ratio. Never upscales.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 || (width <= max_width && height <= max_height) {
        return (width, height);
    }
    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );
    let scaled = |v: u32| ((f64::from(v) * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(png)
}

pub fn png_data_url(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_keeps_small_images() {
        assert_eq!(fit_within(1280, 720, 1920, 1080), (1280, 720));
        assert_eq!(fit_within(0, 0, 1920, 1080), (0, 0));
    }

    #[test]
    fn test_fit_within_scales_retina_screens() {
        assert_eq!(fit_within(3840, 2160, 1920, 1080), (1920, 1080));
        assert_eq!(fit_within(2880, 1800, 1920, 1080), (1728, 1080));
        assert_eq!(fit_within(5120, 1440, 1920, 1080), (1920, 540));
    }

    #[test]
    fn test_png_data_url() {
        let image = RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        let url = png_data_url(&png);
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }
}
