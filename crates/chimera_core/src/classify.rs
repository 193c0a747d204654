//! Input-shape classification.
//!
//! Assigns exactly one [`Modality`] per accepted [`Input`] shape, first match
//! wins. The rules are deliberate heuristics, not content validation: a byte
//! blob that is not a recognizable still image is taken to be audio, and a
//! file path is taken to name an image without ever reading the file.

use crate::error::ClassificationError;
use crate::{Input, Modality};
use image::ImageReader;
use std::io::Cursor;

/// Prefixes that mark a string as an inline image rather than prose.
const DATA_URI_IMAGE_PREFIX: &str = "data:image";
const BASE64_PNG_MAGIC: &str = "iVBOR";

/// Classify `input` into a modality.
///
/// Total for byte, text, path, and record inputs. The microphone-capture
/// sentinel is intercepted by the dispatcher before classification ever runs;
/// when handed here directly it is rejected as unsupported.
pub fn detect(input: &Input) -> Result<Modality, ClassificationError> {
    match input {
        Input::RawBytes(bytes) => {
            if is_still_image(bytes) {
                Ok(Modality::Image)
            } else {
                // Anything that is not a recognizable image container is
                // treated as audio. There is no audio-signature check.
                Ok(Modality::Audio)
            }
        }
        Input::Text(text) => Ok(classify_text(text)),
        Input::FilePath(_) => Ok(Modality::Image),
        Input::StructuredRecord(_) => Ok(Modality::StructuredData),
        Input::MicrophoneCapture => Err(ClassificationError::UnsupportedInput),
    }
}

fn classify_text(text: &str) -> Modality {
    if text.starts_with("http://") || text.starts_with("https://") {
        Modality::Url
    } else if text.starts_with(DATA_URI_IMAGE_PREFIX) || text.starts_with(BASE64_PNG_MAGIC) {
        Modality::Image
    } else {
        Modality::Text
    }
}

/// Probe the magic bytes for a known still-image container.
fn is_still_image(bytes: &[u8]) -> bool {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()
        .and_then(|reader| reader.format())
        .is_some()
}
