//! Packaging: turn a rendered bitmap and its answer into the caller's
//! requested representation

use std::str::FromStr;

use base64::Engine as Base64Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rendering::RasterImage;

/// How the finished challenge is handed back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnMode {
    /// In-process image handle plus answer, for embedding callers
    Direct,
    /// PNG, base64-encoded, paired with the answer for JSON embedding
    Transport,
}

impl FromStr for ReturnMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Error> {
        match s {
            "return" => Ok(ReturnMode::Direct),
            "http" => Ok(ReturnMode::Transport),
            other => Err(Error::InvalidParameter(format!(
                "unsupported return mode {other:?} (expected \"http\" or \"return\")"
            ))),
        }
    }
}

/// Transport-ready challenge, shaped for a JSON response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodedChallenge {
    /// Base64-encoded PNG
    pub captcha_image: String,
    /// Canonical name of the target shape category
    pub answer: String,
}

/// A finished challenge in the representation the caller asked for
#[derive(Debug, Clone)]
pub enum Challenge {
    Direct { image: RasterImage, answer: String },
    Transport(EncodedChallenge),
}

impl Challenge {
    pub fn answer(&self) -> &str {
        match self {
            Challenge::Direct { answer, .. } => answer,
            Challenge::Transport(enc) => &enc.answer,
        }
    }
}

/// Package a rendered image and its answer according to `mode`.
pub fn package(image: RasterImage, answer: &str, mode: ReturnMode) -> Result<Challenge> {
    match mode {
        ReturnMode::Direct => Ok(Challenge::Direct {
            image,
            answer: answer.to_string(),
        }),
        ReturnMode::Transport => {
            let png = encode_png(&image)?;
            let captcha_image = base64::engine::general_purpose::STANDARD.encode(png);
            Ok(Challenge::Transport(EncodedChallenge {
                captcha_image,
                answer: answer.to_string(),
            }))
        }
    }
}

fn encode_png(image: &RasterImage) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut enc = png::Encoder::new(&mut out, image.width, image.height);
    enc.set_color(png::ColorType::Rgb);
    enc.set_depth(png::BitDepth::Eight);
    let mut writer = enc
        .write_header()
        .map_err(|e| Error::RenderError(format!("PNG header: {e}")))?;
    writer
        .write_image_data(&image.pixels)
        .map_err(|e| Error::RenderError(format!("PNG data: {e}")))?;
    writer
        .finish()
        .map_err(|e| Error::RenderError(format!("PNG finish: {e}")))?;
    Ok(out)
}
