use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The binarized image contains no foreground pixels, so there is
    /// nothing to crop or hash.
    #[error("No glyph content in image")]
    NoGlyphContent,
    /// Error decoding image
    #[error("Image could not be decoded")]
    Image(#[from] image::error::ImageError),
    /// Error reading the glyph sample directory
    #[error("Sample directory {path} could not be read")]
    SampleDir {
        path: PathBuf,
        source: io::Error,
    },
}
