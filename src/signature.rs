use crate::segment::FOREGROUND;
use image::GrayImage;

/// Fingerprint a glyph's exact pixel pattern as a 32-character hex digest.
///
/// The digest input is `"{width}x{height}:"` followed by one character per
/// pixel in row-major order, `'1'` for foreground and `'0'` for background.
/// Prefixing the dimensions keeps two grids with the same flattened bit
/// pattern but different shapes from ever hashing to the same signature.
///
/// The digest is deliberately size-sensitive: the same character rendered
/// at different pixel dimensions is a different glyph here.
pub fn signature(glyph: &GrayImage) -> String {
    let (width, height) = glyph.dimensions();
    let mut mask = format!("{}x{}:", width, height);
    mask.reserve((width * height) as usize);
    for pixel in glyph.pixels() {
        mask.push(if pixel[0] == FOREGROUND { '1' } else { '0' });
    }
    format!("{:x}", md5::compute(mask.as_bytes()))
}
