//! Image handling for PDF generation.
//!
//! JPEG data is embedded as-is behind the `DCTDecode` filter. Only the frame
//! header is inspected, to learn the pixel dimensions; nothing is decoded.

use super::object_serializer::ObjectSerializer;
use crate::object::{Dictionary, Object};
use bytes::Bytes;
use log::warn;

/// Start-of-frame markers (baseline and progressive).
const SOF_MARKERS: [u8; 2] = [0xC0, 0xC2];

/// A JPEG image ready to be registered as an image XObject.
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Width in pixels (0 when the header could not be read)
    pub width: u32,
    /// Height in pixels (0 when the header could not be read)
    pub height: u32,
    /// Raw JPEG bytes
    pub data: Bytes,
}

impl ImageData {
    /// Wrap JPEG bytes, sniffing the dimensions from the first SOF marker.
    pub fn from_jpeg(data: impl Into<Bytes>) -> Self {
        let data = data.into();
        let (width, height) = match parse_jpeg_header(&data) {
            Some(dims) => dims,
            None => {
                warn!("No JPEG frame header found in {} bytes; using 0x0", data.len());
                (0, 0)
            },
        };
        Self {
            width,
            height,
            data,
        }
    }

    /// Build the image XObject dictionary. `Length` is added at
    /// serialization time.
    pub fn build_xobject_dict(&self) -> Dictionary {
        ObjectSerializer::dictionary(vec![
            ("Type", ObjectSerializer::name("XObject")),
            ("Subtype", ObjectSerializer::name("Image")),
            ("Width", Object::from(self.width)),
            ("Height", Object::from(self.height)),
            ("ColorSpace", ObjectSerializer::name("DeviceRGB")),
            ("BitsPerComponent", ObjectSerializer::integer(8)),
            ("Filter", ObjectSerializer::name("DCTDecode")),
        ])
    }
}

/// Find the first `FF C0`/`FF C2` marker and read the big-endian height and
/// width that follow the segment length and precision bytes.
///
/// Returns `None` when no marker is present or the header is truncated.
pub fn parse_jpeg_header(data: &[u8]) -> Option<(u32, u32)> {
    let pos = data
        .windows(2)
        .position(|w| w[0] == 0xFF && SOF_MARKERS.contains(&w[1]))?;
    let header = data.get(pos + 5..pos + 9)?;
    let height = u16::from_be_bytes([header[0], header[1]]) as u32;
    let width = u16::from_be_bytes([header[2], header[3]]) as u32;
    Some((width, height))
}
