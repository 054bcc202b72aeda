//! Frame and captured-image types.

use thiserror::Error;

/// Bytes per pixel for RGB8 frames.
const BYTES_PER_PIXEL: usize = 3;

/// JPEG encoding errors.
#[derive(Debug, Error)]
#[error("JPEG encoding failed: {0}")]
pub struct EncodeError(#[from] image::ImageError);

/// A single raw frame grabbed from the camera.
///
/// Pixel data is tightly-packed RGB8 at the camera's native resolution.
#[derive(Clone)]
pub struct Frame {
    /// Raw RGB8 pixel data.
    pixels: Vec<u8>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Monotonic sequence number.
    sequence: u64,
}

impl Frame {
    /// Creates a new frame with the given parameters.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, sequence: u64) -> Self {
        Self {
            pixels,
            width,
            height,
            sequence,
        }
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the sequence number.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Validates that the pixel buffer size matches dimensions.
    pub fn is_valid(&self) -> bool {
        self.pixels.len() == (self.width as usize) * (self.height as usize) * BYTES_PER_PIXEL
    }

    /// Encodes the frame as a JPEG payload.
    pub fn to_jpeg(&self, quality: u8) -> Result<CapturedImage, EncodeError> {
        let mut bytes = Vec::new();
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality);
        encoder.encode(
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgb8,
        )?;
        Ok(CapturedImage::new(bytes))
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("sequence", &self.sequence)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}

/// An opaque compressed image payload.
///
/// Produced once per capture attempt (or supplied from a file) and
/// consumed exactly once by attaching it to a single outgoing request.
pub struct CapturedImage {
    bytes: Vec<u8>,
}

impl CapturedImage {
    /// Wraps an already-encoded image payload (JPEG from capture, or
    /// whatever bytes a user-picked file contains).
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the payload size in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the payload is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns a reference to the payload bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the image, yielding the payload bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let pixels = vec![0u8; 640 * 480 * 3];
        let frame = Frame::new(pixels, 640, 480, 1);

        assert_eq!(frame.width(), 640);
        assert_eq!(frame.height(), 480);
        assert_eq!(frame.sequence(), 1);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_frame_invalid_size() {
        let pixels = vec![0u8; 100]; // Wrong size
        let frame = Frame::new(pixels, 640, 480, 1);

        assert!(!frame.is_valid());
    }

    #[test]
    fn test_to_jpeg_produces_jpeg_magic() {
        let pixels = vec![128u8; 32 * 24 * 3];
        let frame = Frame::new(pixels, 32, 24, 1);

        let image = frame.to_jpeg(80).expect("encode");
        assert!(!image.is_empty());
        // JPEG start-of-image marker
        assert_eq!(&image.as_bytes()[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_captured_image_into_bytes() {
        let image = CapturedImage::new(vec![1, 2, 3]);
        assert_eq!(image.len(), 3);
        assert_eq!(image.into_bytes(), vec![1, 2, 3]);
    }
}
