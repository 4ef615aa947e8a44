use crate::segment::BACKGROUND;
use image::{GenericImage, GrayImage, ImageBuffer, Luma};

/// Lay out glyph images in a horizontal strip, one background column
/// between neighbours, padded to the tallest glyph.
///
/// Meant for operator review: render the glyphs a recognizer extracted
/// next to each other while labeling pending samples.
pub fn collage(glyphs: &[GrayImage]) -> GrayImage {
    if glyphs.is_empty() {
        return GrayImage::new(0, 0);
    }
    let height = glyphs.iter().map(|g| g.height()).max().unwrap_or(1);
    let width = glyphs.iter().map(|g| g.width() + 1).sum::<u32>() - 1;
    let mut strip: GrayImage = ImageBuffer::from_pixel(width, height, Luma([BACKGROUND]));
    let mut x = 0;
    for glyph in glyphs {
        // can not fail: every glyph fits in the strip by construction
        strip.copy_from(glyph, x, 0).unwrap();
        x += glyph.width() + 1;
    }
    strip
}
