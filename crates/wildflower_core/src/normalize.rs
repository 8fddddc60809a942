//! Image preprocessing for the wildflower model.
//!
//! Raw bytes are decoded, rotated upright from EXIF, center-cropped to a
//! square, resized to the model input size and scaled to `[-1, 1]` in NHWC
//! order (InceptionV3 style input).

use crate::error::{Error, Result};
use image::{DynamicImage, GenericImageView, RgbImage, imageops::FilterType};
use ndarray::Array4;
use std::io::Cursor;

/// Side length the model was trained on.
pub const MODEL_INPUT_SIZE: u32 = 299;

/// Model input of shape `(1, size, size, 3)`, RGB, values in `[-1, 1]`.
pub type NormalizedTensor = Array4<f32>;

/// Preprocessing policy: target size and resampling filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    pub input_size: u32,
    pub filter: FilterType,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            input_size: MODEL_INPUT_SIZE,
            filter: FilterType::Lanczos3,
        }
    }
}

impl Normalizer {
    pub fn new(input_size: u32) -> Self {
        Self {
            input_size,
            ..Self::default()
        }
    }

    /// Turn encoded image bytes into a model-ready tensor.
    pub fn normalize(&self, raw: &[u8]) -> Result<NormalizedTensor> {
        let img = decode_oriented(raw)?;
        let (width, height) = img.dimensions();
        let (x, y, side) = center_square_bounds(width, height);
        if side == 0 {
            return Err(Error::Decode(format!("image has no pixels ({width}x{height})")));
        }
        let square = img.crop_imm(x, y, side, side);
        let resized = square
            .resize_exact(self.input_size, self.input_size, self.filter)
            .to_rgb8();
        tracing::debug!(
            original = format!("{width}x{height}"),
            crop = format!("{side}x{side}+{x}+{y}"),
            output = self.input_size,
            "image normalized"
        );
        Ok(to_tensor(&resized))
    }
}

/// Normalize with the default 299x299 Lanczos policy.
pub fn normalize(raw: &[u8]) -> Result<NormalizedTensor> {
    Normalizer::default().normalize(raw)
}

/// Decode bytes and apply the EXIF orientation, if any.
pub fn decode_oriented(raw: &[u8]) -> Result<DynamicImage> {
    if raw.is_empty() {
        return Err(Error::Decode("empty input".to_string()));
    }
    let img = image::load_from_memory(raw).map_err(|e| Error::Decode(e.to_string()))?;
    match read_orientation(raw) {
        Some(tag) => {
            tracing::debug!(tag, "applying EXIF orientation");
            Ok(apply_orientation(img, tag))
        }
        None => Ok(img),
    }
}

/// Read the EXIF Orientation tag. `None` when the image carries no usable tag.
pub fn read_orientation(raw: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(raw);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

/// Rotate so the image is upright. Only the pure rotations 3, 6 and 8 are
/// handled; every other value leaves the image untouched.
pub fn apply_orientation(img: DynamicImage, tag: u32) -> DynamicImage {
    match tag {
        3 => img.rotate180(),
        // 270 degrees counter-clockwise
        6 => img.rotate90(),
        // 90 degrees counter-clockwise
        8 => img.rotate270(),
        _ => img,
    }
}

/// Largest centered square inside `width x height`, as `(x, y, side)`.
///
/// Offsets truncate, so for an odd difference the right (or bottom) edge
/// loses one pixel more than the left (or top).
pub fn center_square_bounds(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}

fn to_tensor(rgb: &RgbImage) -> NormalizedTensor {
    let (width, height) = rgb.dimensions();
    let mut array = Array4::<f32>::zeros((1, height as usize, width as usize, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (row, col) = (y as usize, x as usize);
        for (channel, &value) in pixel.0.iter().enumerate() {
            array[[0, row, col, channel]] = scale_channel(value);
        }
    }
    array
}

fn scale_channel(value: u8) -> f32 {
    value as f32 / 127.5 - 1.0
}
