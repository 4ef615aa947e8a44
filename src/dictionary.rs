use crate::error::Error;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Labels the dictionary is expected to cover. The target renderer only
/// draws digits.
const EXPECTED_LABELS: &str = "0123456789";

/// In-memory view of the glyph sample directory.
///
/// Each labeled sample file `<label>_<signature>.png` contributes one entry
/// to both lookup directions. The dictionary is built once at startup and
/// never mutated afterwards; newly observed glyphs only become visible
/// after an operator labels their pending sample file and the dictionary is
/// reloaded.
pub struct GlyphDictionary {
    label_signature: HashMap<char, String>,
    signature_label: HashMap<String, char>,
}

enum SampleName<'a> {
    Labeled(char, &'a str),
    Pending(&'a str),
    Malformed,
}

fn is_signature(s: &str) -> bool {
    s.len() == 32 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn parse_sample_name(stem: &str) -> SampleName {
    match stem.split_once('_') {
        Some((label, signature)) => {
            let mut chars = label.chars();
            match (chars.next(), chars.next()) {
                (Some(label), None) if is_signature(signature) => {
                    SampleName::Labeled(label, signature)
                }
                _ => SampleName::Malformed,
            }
        }
        None if is_signature(stem) => SampleName::Pending(stem),
        None => SampleName::Malformed,
    }
}

impl GlyphDictionary {
    /// Build a dictionary from the sample files in `dir`.
    ///
    /// Files with a name that matches neither the labeled nor the pending
    /// pattern are skipped with a diagnostic; a warning lists the expected
    /// labels that have no sample yet.
    ///
    /// # Errors
    /// If the directory itself can not be read.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<GlyphDictionary, Error> {
        let dir = dir.as_ref();
        let read_err = |source| Error::SampleDir {
            path: dir.to_path_buf(),
            source,
        };
        let mut label_signature = HashMap::new();
        let mut signature_label = HashMap::new();
        for entry in fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            match parse_sample_name(stem) {
                SampleName::Labeled(label, signature) => {
                    label_signature.insert(label, signature.to_string());
                    signature_label.insert(signature.to_string(), label);
                }
                SampleName::Pending(signature) => {
                    debug!("Sample {} is still waiting for a label", signature);
                }
                SampleName::Malformed => {
                    warn!("Skipping sample file with a nonstandard name: {:?}", path);
                }
            }
        }
        let dictionary = GlyphDictionary {
            label_signature,
            signature_label,
        };
        let missing = dictionary.missing_labels();
        if !missing.is_empty() {
            warn!(
                "No labeled sample yet for {} digit(s): {:?}",
                missing.len(),
                missing
            );
        }
        Ok(dictionary)
    }

    /// Look up the label for a glyph signature.
    pub fn lookup(&self, signature: &str) -> Option<char> {
        self.signature_label.get(signature).copied()
    }

    /// The signature recorded for `label`, if any.
    pub fn signature_for(&self, label: char) -> Option<&str> {
        self.label_signature.get(&label).map(String::as_str)
    }

    /// Expected labels with no labeled sample in the directory yet.
    /// A coverage diagnostic, not an error.
    pub fn missing_labels(&self) -> Vec<char> {
        EXPECTED_LABELS
            .chars()
            .filter(|label| !self.label_signature.contains_key(label))
            .collect()
    }

    /// Number of labeled entries.
    pub fn len(&self) -> usize {
        self.signature_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signature_label.is_empty()
    }
}
