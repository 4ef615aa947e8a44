use anyhow::Result;
use captcha_ocr::{signature, Error, Recognizer, PLACEHOLDER};
use image::{GrayImage, Luma};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const THREE: &[&str] = &["###", "..#", "###", "..#", "###"];
const ZERO: &[&str] = &["###", "#.#", "#.#", "#.#", "###"];
const ONE: &[&str] = &[".#", "##", ".#", ".#", ".#"];
const SEVEN: &[&str] = &["###", "..#", "..#", "..#", "..#"];
// not in any dictionary
const UNKNOWN: &[&str] = &["#.#", "#.#", ".#.", "#.#", "#.#"];

/// Capture the crate's diagnostics in test output, `RUST_LOG` permitting.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a tight binary glyph from a `#`/`.` pattern.
fn glyph(rows: &[&str]) -> GrayImage {
    GrayImage::from_fn(rows[0].len() as u32, rows.len() as u32, |x, y| {
        match rows[y as usize].as_bytes()[x as usize] {
            b'#' => Luma([255]),
            _ => Luma([0]),
        }
    })
}

/// Paste glyphs onto a noisy canvas, `gap` background columns apart.
///
/// Ink is rendered at 200 and background at 40, so recognition has to
/// binarize before it can segment.
fn compose(glyphs: &[&GrayImage], gap: u32, margin: u32) -> GrayImage {
    let height = glyphs.iter().map(|g| g.height()).max().unwrap() + 2 * margin;
    let width = glyphs.iter().map(|g| g.width()).sum::<u32>()
        + gap * (glyphs.len() as u32 - 1)
        + 2 * margin;
    let mut canvas = GrayImage::from_pixel(width, height, Luma([40]));
    let mut left = margin;
    for glyph in glyphs {
        for (x, y, pixel) in glyph.enumerate_pixels() {
            if pixel[0] == 255 {
                canvas.put_pixel(left + x, margin + y, Luma([200]));
            }
        }
        left += glyph.width() + gap;
    }
    canvas
}

fn save_labeled(dir: &Path, label: char, glyph: &GrayImage) -> Result<String> {
    let sig = signature(glyph);
    glyph.save(dir.join(format!("{}_{}.png", label, sig)))?;
    Ok(sig)
}

fn count_files(dir: &Path) -> Result<usize> {
    Ok(fs::read_dir(dir)?.count())
}

#[test]
fn recognizes_learned_digits() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let (three, zero, one) = (glyph(THREE), glyph(ZERO), glyph(ONE));
    save_labeled(dir.path(), '3', &three)?;
    save_labeled(dir.path(), '0', &zero)?;
    save_labeled(dir.path(), '1', &one)?;

    let recognizer = Recognizer::new(dir.path())?;
    let img = compose(&[&three, &zero, &one], 2, 3);
    assert_eq!(recognizer.recognize(&img)?, "301");
    // no unknown glyphs, so nothing new is persisted
    assert_eq!(count_files(dir.path())?, 3);
    Ok(())
}

#[test]
fn gap_width_does_not_matter() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let (seven, zero) = (glyph(SEVEN), glyph(ZERO));
    save_labeled(dir.path(), '7', &seven)?;
    save_labeled(dir.path(), '0', &zero)?;

    let recognizer = Recognizer::new(dir.path())?;
    for gap in [1, 2, 5] {
        let img = compose(&[&seven, &zero], gap, 2);
        assert_eq!(recognizer.recognize(&img)?, "70");
    }
    Ok(())
}

#[test]
fn unknown_glyph_yields_placeholder_and_one_pending_sample() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let (seven, zero, unknown) = (glyph(SEVEN), glyph(ZERO), glyph(UNKNOWN));
    save_labeled(dir.path(), '7', &seven)?;
    save_labeled(dir.path(), '0', &zero)?;

    let recognizer = Recognizer::new(dir.path())?;
    let img = compose(&[&seven, &zero, &unknown], 2, 3);
    let text = recognizer.recognize(&img)?;
    assert_eq!(text, format!("70{}", PLACEHOLDER));

    let pending = dir.path().join(format!("{}.png", signature(&unknown)));
    assert!(pending.exists());
    assert_eq!(count_files(dir.path())?, 3);
    Ok(())
}

#[test]
fn repeated_unknown_glyph_is_persisted_once() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let unknown = glyph(UNKNOWN);
    let recognizer = Recognizer::new(dir.path())?;
    let img = compose(&[&unknown, &unknown, &unknown], 2, 2);
    assert_eq!(recognizer.recognize(&img)?, "---");
    assert_eq!(count_files(dir.path())?, 1);
    Ok(())
}

#[test]
fn pending_sample_on_disk_is_not_rewritten() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let unknown = glyph(UNKNOWN);
    unknown.save(dir.path().join(format!("{}.png", signature(&unknown))))?;

    let recognizer = Recognizer::new(dir.path())?;
    let img = compose(&[&unknown], 2, 2);
    assert_eq!(recognizer.recognize(&img)?, "-");
    assert_eq!(count_files(dir.path())?, 1);
    Ok(())
}

#[test]
fn all_background_image_is_rejected() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let recognizer = Recognizer::new(dir.path())?;
    let img = GrayImage::from_pixel(20, 10, Luma([40]));
    match recognizer.recognize(&img) {
        Err(Error::NoGlyphContent) => Ok(()),
        other => panic!("expected NoGlyphContent, got {:?}", other),
    }
}

#[test]
fn nonstandard_sample_names_are_skipped() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let three = glyph(THREE);
    save_labeled(dir.path(), '3', &three)?;
    // two-character label, a stray extra underscore, and no separator at all
    three.save(dir.path().join(format!("ab_{}.png", signature(&three))))?;
    three.save(dir.path().join(format!("3_{}_backup.png", signature(&three))))?;
    three.save(dir.path().join("readme.png"))?;

    let recognizer = Recognizer::new(dir.path())?;
    let dictionary = recognizer.dictionary();
    assert_eq!(dictionary.len(), 1);
    assert_eq!(dictionary.lookup(&signature(&three)), Some('3'));
    assert_eq!(dictionary.signature_for('3'), Some(signature(&three).as_str()));
    assert_eq!(dictionary.signature_for('9'), None);

    let missing = dictionary.missing_labels();
    assert_eq!(missing.len(), 9);
    assert!(!missing.contains(&'3'));
    Ok(())
}

#[test]
fn recognize_from_memory_decodes_and_recognizes() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let one = glyph(ONE);
    save_labeled(dir.path(), '1', &one)?;

    let img = compose(&[&one, &one], 3, 2);
    let img_path = dir.path().join("input.png");
    img.save(&img_path)?;
    let buf = fs::read(&img_path)?;
    fs::remove_file(&img_path)?;

    let recognizer = Recognizer::new(dir.path())?;
    assert_eq!(recognizer.recognize_from_memory(&buf)?, "11");
    Ok(())
}
