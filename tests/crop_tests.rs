use favicon_tools::*;
use image::{Rgba, RgbaImage};
use std::fs;
use tempfile::tempdir;

fn create_padded_logo(width: u32, height: u32, content: BoundingBox) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let inside = x >= content.left && x < content.right && y >= content.top && y < content.bottom;
        if inside {
            Rgba([(x * 7) as u8, (y * 11) as u8, 90, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[test]
fn test_crop_writes_destination() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("upload.png");
    let destination = dir.path().join("public").join("favicon.png");
    fs::create_dir_all(destination.parent().unwrap()).unwrap();

    let content = BoundingBox { left: 6, top: 4, right: 26, bottom: 30 };
    let original = create_padded_logo(40, 36, content);
    original.save(&source).unwrap();
    let source_bytes = fs::read(&source).unwrap();

    let report = crop_file(&source, &destination).unwrap();

    assert_eq!(report.original_size, (40, 36));
    assert_eq!(report.bbox, Some(content));
    assert_eq!(report.output_size, (20, 26));

    let cropped = load_rgba(&destination).unwrap();
    assert_eq!(cropped.dimensions(), (20, 26));
    assert_eq!(cropped.get_pixel(0, 0), original.get_pixel(6, 4));
    assert_eq!(cropped.get_pixel(19, 25), original.get_pixel(25, 29));

    // Source is never touched
    assert_eq!(fs::read(&source).unwrap(), source_bytes);
}

#[test]
fn test_cropped_output_is_tight() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("in.png");
    let destination = dir.path().join("out.png");
    let mut img = RgbaImage::new(32, 32);
    img.put_pixel(3, 20, Rgba([0, 0, 0, 5]));
    img.put_pixel(17, 9, Rgba([255, 0, 0, 255]));
    img.save(&source).unwrap();

    let report = crop_file(&source, &destination).unwrap();
    assert_eq!(
        report.bbox,
        Some(BoundingBox { left: 3, top: 9, right: 18, bottom: 21 })
    );

    let cropped = load_rgba(&destination).unwrap();
    let again = content_bbox(&cropped).unwrap();
    assert!(again.covers(cropped.width(), cropped.height()));
}

#[test]
fn test_fully_transparent_copied_unchanged() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("blank.png");
    let destination = dir.path().join("favicon.png");
    let blank = RgbaImage::new(50, 50);
    blank.save(&source).unwrap();

    let report = crop_file(&source, &destination).unwrap();

    assert!(report.bbox.is_none());
    assert_eq!(report.output_size, (50, 50));
    assert_eq!(load_rgba(&destination).unwrap(), blank);
}

#[test]
fn test_opaque_image_is_noop() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("photo.png");
    let destination = dir.path().join("favicon.png");
    let opaque = RgbaImage::from_fn(24, 18, |x, y| Rgba([(x * 10) as u8, (y * 13) as u8, 42, 255]));
    opaque.save(&source).unwrap();

    let report = crop_file(&source, &destination).unwrap();

    assert_eq!(
        report.bbox,
        Some(BoundingBox { left: 0, top: 0, right: 24, bottom: 18 })
    );
    assert_eq!(load_rgba(&destination).unwrap(), opaque);
}

#[test]
fn test_destination_overwritten() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("in.png");
    let destination = dir.path().join("favicon.png");
    fs::write(&destination, b"stale").unwrap();
    create_padded_logo(10, 10, BoundingBox { left: 2, top: 2, right: 5, bottom: 6 })
        .save(&source)
        .unwrap();

    crop_file(&source, &destination).unwrap();

    assert_eq!(load_rgba(&destination).unwrap().dimensions(), (3, 4));
}

#[test]
fn test_unreadable_source_reports_path() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("corrupt.png");
    fs::write(&source, b"\x89PNG but not really").unwrap();

    let err = crop_file(&source, &dir.path().join("out.png")).unwrap_err();

    assert!(matches!(err, Error::ImageLoad { .. }));
    assert!(err.to_string().contains("corrupt.png"));
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn test_source_format_detected_from_content() {
    let dir = tempdir().unwrap();
    let content = BoundingBox { left: 1, top: 2, right: 7, bottom: 9 };
    let logo = create_padded_logo(10, 10, content);

    for name in ["favicon", "favicon.jpg"] {
        let source = dir.path().join(name);
        save_png(&logo, &source).unwrap();
        let destination = dir.path().join(format!("{name}-out.png"));

        let report = crop_file(&source, &destination).unwrap();

        assert_eq!(report.bbox, Some(content));
        assert_eq!(load_rgba(&destination).unwrap().dimensions(), (6, 7));
    }
}

#[test]
fn test_unsupported_format_is_missing_capability() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("icon.xyz");
    fs::write(&source, b"whatever").unwrap();

    let err = crop_file(&source, &dir.path().join("out.png")).unwrap_err();
    assert!(err.is_missing_capability());
}
