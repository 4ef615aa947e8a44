use crate::dictionary::GlyphDictionary;
use crate::error::Error;
use crate::segment::{binarize, crop_to_text, extract_glyphs};
use crate::signature::signature;
use image::GrayImage;
use log::{info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Emitted in place of a glyph whose signature has no dictionary entry.
pub const PLACEHOLDER: char = '-';

/// Glyph recognizer for short digit runs.
///
/// Holds the dictionary loaded from the sample directory, and writes a
/// pending sample file into that directory for every glyph it has never
/// seen before.
pub struct Recognizer {
    dictionary: GlyphDictionary,
    sample_dir: PathBuf,
}

impl Recognizer {
    /// Create a recognizer backed by the sample files in `sample_dir`.
    ///
    /// # Errors
    /// If the sample directory can not be read.
    pub fn new<P: AsRef<Path>>(sample_dir: P) -> Result<Recognizer, Error> {
        let sample_dir = sample_dir.as_ref().to_path_buf();
        let dictionary = GlyphDictionary::load(&sample_dir)?;
        Ok(Recognizer {
            dictionary,
            sample_dir,
        })
    }

    pub fn dictionary(&self) -> &GlyphDictionary {
        &self.dictionary
    }

    /// Recognize the text in a grayscale image.
    ///
    /// The recognition process consists of these phases:
    /// 1. Binarize the image and crop it to the text area
    /// 2. Split the crop into glyphs at the background gaps
    /// 3. Hash each glyph and look its signature up in the dictionary
    ///
    /// An unknown glyph never fails the call: it yields [PLACEHOLDER] in
    /// the result, and its image is saved to the sample directory as
    /// `<signature>.png` so an operator can label it later. At most one
    /// file is written per new signature, even when the same unknown glyph
    /// repeats within the image or is already pending on disk. A failed
    /// write is logged and the recognized text is still returned.
    ///
    /// # Errors
    /// * [Error::NoGlyphContent] if the binarized image is all background.
    pub fn recognize(&self, img: &GrayImage) -> Result<String, Error> {
        let binary = binarize(img);
        let text = crop_to_text(&binary)?;
        let glyphs = extract_glyphs(&text)?;
        let mut seen = self.stems_on_disk();
        let mut result = String::with_capacity(glyphs.len());
        for glyph in &glyphs {
            let signature = signature(glyph);
            match self.dictionary.lookup(&signature) {
                Some(label) => result.push(label),
                None => {
                    result.push(PLACEHOLDER);
                    if seen.insert(signature.clone()) {
                        self.save_pending(glyph, &signature);
                    }
                }
            }
        }
        Ok(result)
    }

    pub fn recognize_from_file<P: AsRef<Path>>(&self, path: P) -> Result<String, Error> {
        let gray = image::open(path)?.into_luma8();
        self.recognize(&gray)
    }

    pub fn recognize_from_memory(&self, buf: &[u8]) -> Result<String, Error> {
        let gray = image::load_from_memory(buf)?.into_luma8();
        self.recognize(&gray)
    }

    /// File stems already present in the sample directory. Seeds the
    /// per-call dedup set so a signature that is pending on disk is not
    /// written again. A listing failure only disables the dedup.
    fn stems_on_disk(&self) -> HashSet<String> {
        let mut stems = HashSet::new();
        match fs::read_dir(&self.sample_dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                        stems.insert(stem.to_string());
                    }
                }
            }
            Err(err) => warn!(
                "Could not list sample directory {:?}: {}",
                self.sample_dir, err
            ),
        }
        stems
    }

    fn save_pending(&self, glyph: &GrayImage, signature: &str) {
        let path = self.sample_dir.join(format!("{}.png", signature));
        info!(
            "Found a new glyph with signature {}. Saving it to {:?}, don't forget to label it!",
            signature, path
        );
        if let Err(err) = glyph.save(&path) {
            warn!("Could not save glyph sample {:?}: {}", path, err);
        }
    }
}
