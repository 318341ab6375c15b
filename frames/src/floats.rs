//! Flat little-endian `f32` arrays.
//!
//! Numeric payloads are a packed sequence of 4-byte floats starting at the
//! payload offset, with no length prefix.

use crate::CodecError;

const F32_SIZE: usize = std::mem::size_of::<f32>();

/// Decode `data[offset..]` as little-endian `f32` values.
///
/// # Errors
///
/// Returns [`CodecError::OffsetOutOfRange`] when `offset > data.len()` and
/// [`CodecError::MisalignedFloats`] when the remaining length is not a
/// multiple of 4.
pub fn decode_f32_le(data: &[u8], offset: usize) -> Result<Vec<f32>, CodecError> {
    let body = data
        .get(offset..)
        .ok_or(CodecError::OffsetOutOfRange { offset, len: data.len() })?;
    if body.len() % F32_SIZE != 0 {
        return Err(CodecError::MisalignedFloats { len: body.len() });
    }
    Ok(body
        .chunks_exact(F32_SIZE)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Encode values as packed little-endian `f32`.
#[must_use]
pub fn encode_f32_le(values: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * F32_SIZE);
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

/// Comma-joined display form, e.g. `[1.0, 2.5]` → `"1,2.5"`.
#[must_use]
pub fn format_floats(values: &[f32]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
#[path = "floats_test.rs"]
mod floats_test;
