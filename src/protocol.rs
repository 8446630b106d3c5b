//! Wire types shared with the service layer and frontend.
//!
//! Challenge responses carry the scheme tag and the tiles as PNG data
//! URIs in display order. Submitted solutions arrive as loosely-typed
//! JSON arrays and are parsed into the scheme-appropriate descriptor
//! shape here; any shape violation is a malformed descriptor, never a
//! silently-coerced value.

use crate::config::{CaptchaError, Result};
use crate::puzzle::Picture;
use crate::scramble::Scheme;
use crate::solve::Solution;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Cursor;

/// Server response to a new-challenge request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TilesResponse {
    /// Scheme tag: `rows`, `grid`, or `circles`.
    #[serde(rename = "type")]
    pub kind: String,
    /// PNG data URIs of the tiles, in `tile_order`'s (scrambled) order.
    pub tiles: Vec<String>,
}

impl TilesResponse {
    /// Renders and encodes every tile of `picture` in display order.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::Encode`] if a tile fails PNG encoding.
    pub fn from_picture(picture: &Picture) -> Result<Self> {
        let tiles = picture
            .tile_order()
            .iter()
            .map(|&id| data_uri(picture, id))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            kind: picture.scheme().tag().to_string(),
            tiles,
        })
    }
}

fn data_uri(picture: &Picture, tile_id: usize) -> Result<String> {
    let rendered = picture.tiles()[tile_id].render();
    let mut png = Vec::new();
    rendered.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}

/// Request body for a submitted solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionRequest {
    /// Scheme-shaped array: ints (rows), `[index, degrees]` pairs (grid),
    /// or floats (circles).
    pub solution: Vec<Value>,
}

/// Response body for a submitted solution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionResponse {
    pub solved: bool,
}

/// Request body for the side-channel code path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionCodeRequest {
    pub code: String,
}

/// Response body for the side-channel code path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionCodeResponse {
    pub solved: bool,
}

fn malformed(scheme: Scheme, value: &Value) -> CaptchaError {
    CaptchaError::MalformedDescriptor(format!("{value} does not fit the {scheme} shape"))
}

impl Solution {
    /// Parses a wire-level solution array into the descriptor shape the
    /// given scheme expects.
    ///
    /// # Errors
    ///
    /// Returns [`CaptchaError::MalformedDescriptor`] on any element that
    /// does not fit the scheme's shape.
    pub fn from_wire(scheme: Scheme, values: &[Value]) -> Result<Self> {
        match scheme {
            Scheme::Rows => values
                .iter()
                .map(|v| {
                    v.as_u64()
                        .map(|n| n as usize)
                        .ok_or_else(|| malformed(scheme, v))
                })
                .collect::<Result<Vec<_>>>()
                .map(Solution::Rows),
            Scheme::Grid => values
                .iter()
                .map(|v| {
                    let pair = v.as_array().filter(|a| a.len() == 2);
                    let pair = pair.ok_or_else(|| malformed(scheme, v))?;
                    let index = pair[0].as_u64().ok_or_else(|| malformed(scheme, v))?;
                    let degrees = pair[1].as_f64().ok_or_else(|| malformed(scheme, v))?;
                    Ok((index as usize, degrees))
                })
                .collect::<Result<Vec<_>>>()
                .map(Solution::Grid),
            Scheme::Rings => values
                .iter()
                .map(|v| v.as_f64().ok_or_else(|| malformed(scheme, v)))
                .collect::<Result<Vec<_>>>()
                .map(Solution::Rings),
        }
    }

    /// Serializes this descriptor into the wire-level array shape.
    #[must_use]
    pub fn to_wire(&self) -> Vec<Value> {
        match self {
            Self::Rows(order) => order.iter().map(|&i| Value::from(i)).collect(),
            Self::Grid(pairs) => pairs
                .iter()
                .map(|&(i, deg)| Value::from(vec![Value::from(i), Value::from(deg)]))
                .collect(),
            Self::Rings(degrees) => degrees.iter().map(|&d| Value::from(d)).collect(),
        }
    }
}
