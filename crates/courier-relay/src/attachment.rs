// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data-URI photo payloads.

use base64::Engine;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use courier_core::error::CourierError;

const MARKER: &str = "base64,";

/// Standard alphabet; browsers sometimes drop or keep padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes a `data:<mime>;base64,<payload>` string to raw bytes.
///
/// Everything up to the last `base64,` marker is ignored, and embedded
/// whitespace (line-wrapped payloads) is stripped before decoding.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, CourierError> {
    let start = uri
        .rfind(MARKER)
        .ok_or_else(|| CourierError::Attachment("missing base64 marker".into()))?;

    let payload: String = uri[start + MARKER.len()..]
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if payload.is_empty() {
        return Err(CourierError::Attachment("no base64 data found".into()));
    }

    let bytes = LENIENT
        .decode(payload.as_bytes())
        .map_err(|e| CourierError::Attachment(format!("invalid base64 image data: {e}")))?;
    if bytes.is_empty() {
        return Err(CourierError::Attachment("decoded image is empty".into()));
    }
    Ok(bytes)
}
