//! Barcode and QR recognition.
//!
//! Recognition itself is delegated to `rxing`; this module wraps it
//! with the preprocess ladder (grayscale, blur, sharpen, threshold)
//! that rescues frames the plain decode pass misses, and with overlay
//! drawing for the decoded regions.

pub mod overlay;
pub mod preprocess;

use image::{DynamicImage, GrayImage};
use rxing::Exceptions;

use crate::config::DecodeSettings;

/// Errors that can occur during decoding.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The decoding engine reported a hard failure.
    ///
    /// "Nothing found in this frame" is not an error; it comes back as
    /// an empty result set.
    #[error("Decoder failure: {0}")]
    Engine(String),
}

/// A barcode or QR payload decoded from one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedObject {
    /// Symbology label (QR_CODE, EAN_13, CODE_128, ...).
    pub symbology: String,
    /// Decoded payload text.
    pub payload: String,
    /// Corner points of the decoded region, in frame coordinates.
    pub corners: Vec<(f32, f32)>,
}

/// Preprocess ladder stage that produced a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Unmodified frame (rxing works on the luma plane, so this also
    /// covers the plain-grayscale pass).
    Plain,
    /// Gaussian blur.
    Blurred,
    /// Weighted sharpen over the blurred image.
    Sharpened,
    /// Binary threshold.
    Thresholded,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Plain => "plain",
            Stage::Blurred => "blurred",
            Stage::Sharpened => "sharpened",
            Stage::Thresholded => "thresholded",
        }
    }
}

/// A successful decode together with the ladder stage that produced it.
#[derive(Debug, Clone)]
pub struct LadderHit {
    pub objects: Vec<DecodedObject>,
    pub stage: Stage,
}

/// Decode all barcodes/QR codes in a frame.
///
/// Returns an empty vec when the frame contains nothing recognizable.
pub fn decode_frame(frame: &DynamicImage) -> Result<Vec<DecodedObject>, DecodeError> {
    decode_luma(&frame.to_luma8())
}

/// Decode all barcodes/QR codes in a grayscale image.
pub fn decode_luma(image: &GrayImage) -> Result<Vec<DecodedObject>, DecodeError> {
    let (width, height) = image.dimensions();

    let results =
        match rxing::helpers::detect_multiple_in_luma(image.as_raw().clone(), width, height) {
            Ok(results) => results,
            Err(Exceptions::NotFoundException(_)) => Vec::new(),
            Err(e) => return Err(DecodeError::Engine(e.to_string())),
        };

    Ok(results
        .into_iter()
        .map(|result| DecodedObject {
            symbology: result.getBarcodeFormat().to_string(),
            payload: result.getText().to_string(),
            corners: result
                .getRXingResultPoints()
                .iter()
                .map(|p| (p.x, p.y))
                .collect(),
        })
        .collect())
}

/// Run the preprocess ladder until a stage decodes something.
///
/// Stage order: plain frame, gaussian blur, weighted sharpen, binary
/// threshold. The first stage with a non-empty result wins.
pub fn decode_with_ladder(
    frame: &DynamicImage,
    settings: &DecodeSettings,
) -> Result<Option<LadderHit>, DecodeError> {
    let grey = frame.to_luma8();

    let objects = decode_luma(&grey)?;
    if !objects.is_empty() {
        return Ok(Some(LadderHit {
            objects,
            stage: Stage::Plain,
        }));
    }

    if !settings.preprocess_ladder {
        return Ok(None);
    }

    let blurred = preprocess::gaussian_blur(&grey, settings.blur_sigma);
    let objects = decode_luma(&blurred)?;
    if !objects.is_empty() {
        return Ok(Some(LadderHit {
            objects,
            stage: Stage::Blurred,
        }));
    }

    let sharpened =
        preprocess::sharpen(&grey, &blurred, settings.sharpen_weight, settings.blur_weight);
    let objects = decode_luma(&sharpened)?;
    if !objects.is_empty() {
        return Ok(Some(LadderHit {
            objects,
            stage: Stage::Sharpened,
        }));
    }

    let thresholded = preprocess::threshold(&sharpened, settings.threshold);
    let objects = decode_luma(&thresholded)?;
    if !objects.is_empty() {
        return Ok(Some(LadderHit {
            objects,
            stage: Stage::Thresholded,
        }));
    }

    Ok(None)
}
