use crate::error::Error;
use image::{math::Rect, GenericImageView, GrayImage, Luma};
use imageproc::map::map_pixels;

/// Pixel value of the page/noise class after binarization.
pub const BACKGROUND: u8 = 0;
/// Pixel value of the ink/text class after binarization.
pub const FOREGROUND: u8 = 255;

/// Reduce a grayscale image to exactly two pixel values.
///
/// The target renderer draws glyph ink near white over dark noise, so a
/// plain midpoint rule is enough: a pixel at or above half the maximum
/// intensity becomes [FOREGROUND], everything else [BACKGROUND].
pub fn binarize(img: &GrayImage) -> GrayImage {
    map_pixels(img, |_x, _y, p| {
        if p[0] >= FOREGROUND / 2 {
            Luma([FOREGROUND])
        } else {
            Luma([BACKGROUND])
        }
    })
}

/// Return the tight bounding rectangle of all foreground pixels,
/// or `None` if the image contains no foreground at all.
pub fn text_bounds(img: &GrayImage) -> Option<Rect> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel[0] != FOREGROUND {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, x, y, y),
            Some((left, right, top, bottom)) => {
                (left.min(x), right.max(x), top.min(y), bottom.max(y))
            }
        });
    }
    bounds.map(|(left, right, top, bottom)| Rect {
        x: left,
        y: top,
        width: right - left + 1,
        height: bottom - top + 1,
    })
}

/// Crop the image to the bounding rectangle of its foreground pixels.
///
/// # Errors
/// [Error::NoGlyphContent] if the image is all background.
pub fn crop_to_text(img: &GrayImage) -> Result<GrayImage, Error> {
    let bounds = text_bounds(img).ok_or(Error::NoGlyphContent)?;
    Ok(img
        .view(bounds.x, bounds.y, bounds.width, bounds.height)
        .to_image())
}

/// Find the cut points that separate glyphs, left to right.
///
/// A column with no foreground pixel is a gap. A gap between two glyphs is
/// often wider than one pixel; a run of gap columns must yield a single cut
/// point, so the column index is recorded only on the first column of each
/// run. The image width is appended as the final cut point, closing the
/// last glyph.
pub fn find_gaps(img: &GrayImage) -> Vec<u32> {
    let (width, height) = img.dimensions();
    let mut gaps = Vec::new();
    let mut in_gap = false;
    for x in 0..width {
        let gap = (0..height).all(|y| img.get_pixel(x, y)[0] != FOREGROUND);
        if gap {
            if !in_gap {
                in_gap = true;
                gaps.push(x);
            }
        } else {
            in_gap = false;
        }
    }
    gaps.push(width);
    gaps
}

/// Slice a cropped text image into its glyphs, in reading order.
///
/// Each vertical slice between two cut points is re-cropped tightly, so the
/// signature of a glyph depends only on its own ink and not on the height
/// of its neighbours. Two glyphs with no background column between them are
/// not split; they come out as a single oversized glyph.
///
/// # Errors
/// [Error::NoGlyphContent] if a slice contains no foreground. This can not
/// happen for an image that was cropped with [crop_to_text] first.
pub fn extract_glyphs(img: &GrayImage) -> Result<Vec<GrayImage>, Error> {
    let height = img.height();
    let mut glyphs = Vec::new();
    let mut left = 0;
    for cut in find_gaps(img) {
        let slice = img.view(left, 0, cut - left, height).to_image();
        glyphs.push(crop_to_text(&slice)?);
        left = cut;
    }
    Ok(glyphs)
}
