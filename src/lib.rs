//! An OCR library that reads short digit runs from captcha-style images.
//!
//! Some proxy-list sites render the captcha text and the port number of
//! each proxy as small two-tone bitmaps. This library recognizes those
//! bitmaps with a dictionary of glyph signatures instead of a trained
//! model: the image is binarized, cropped to its text, split into glyphs
//! at the background gaps, and each glyph's exact pixel pattern is hashed
//! and looked up in a directory of labeled sample files.
//!
//! # Basic usage
//! ```no_run
//! # use captcha_ocr::{Recognizer, Error};
//! let gray = image::open("captcha.png")?.into_luma8();
//! let recognizer = Recognizer::new("digits")?;
//! let text = recognizer.recognize(&gray)?;
//! println!("{}", text);
//! # Ok::<(), Error>(())
//! ```
//!
//! A glyph the dictionary does not know yields `'-'` in the result, and
//! its image is saved to the sample directory named by its signature.
//! Renaming that file from `<signature>.png` to `<label>_<signature>.png`
//! teaches the next recognizer instance the glyph; callers typically treat
//! any `'-'` in the result as "recognition failed, retry".
//!
//! # Limitations
//! Two glyphs with no background column between them are treated as one
//! glyph, and signatures are size-sensitive: the same character rendered
//! at other pixel dimensions is an unknown glyph. Both are deliberate;
//! the target renderer produces well separated glyphs at a fixed size.

mod dictionary;
mod error;
mod recognizer;
mod segment;
mod signature;
mod utils;

pub use dictionary::GlyphDictionary;
pub use error::Error;
pub use recognizer::{Recognizer, PLACEHOLDER};
pub use segment::{
    binarize, crop_to_text, extract_glyphs, find_gaps, text_bounds, BACKGROUND, FOREGROUND,
};
pub use signature::signature;
pub use utils::collage;
