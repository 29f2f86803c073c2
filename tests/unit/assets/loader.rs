use std::io::Cursor;

use super::*;

fn png_file(name: &str) -> ImageFile {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    ImageFile::new(name, "image/png", buf)
}

#[test]
fn rejects_non_image_mime_without_dispatching() {
    let mut loader = ImageLoader::new();
    let err = loader
        .load(
            ImageKind::Photo,
            ImageFile::new("notes.txt", "text/plain", b"hello".to_vec()),
        )
        .unwrap_err();
    assert!(matches!(err, CarnetError::InvalidFileType(_)));
    assert_eq!(loader.in_flight(), 0);
    assert!(loader.wait_completion().is_none());
}

#[test]
fn decodes_off_thread_and_reports_completion() {
    let mut loader = ImageLoader::new();
    loader.load(ImageKind::Logo, png_file("logo.png")).unwrap();
    assert_eq!(loader.in_flight(), 1);

    let done = loader.wait_completion().unwrap();
    assert_eq!(done.kind, ImageKind::Logo);
    assert_eq!(done.file_name, "logo.png");
    let img = done.result.unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(loader.in_flight(), 0);
}

#[test]
fn decode_failure_is_reported_not_thrown() {
    let mut loader = ImageLoader::new();
    loader
        .load(
            ImageKind::Template,
            ImageFile::new("broken.png", "image/png", b"\x89PNG garbage".to_vec()),
        )
        .unwrap();
    let done = loader.wait_completion().unwrap();
    assert!(matches!(done.result, Err(CarnetError::Decode(_))));
}

#[test]
fn from_path_read_failure() {
    let err = ImageFile::from_path("target/definitely-missing.png").unwrap_err();
    assert!(matches!(err, CarnetError::Read(_)));
}

#[test]
fn mime_check_is_case_insensitive() {
    assert!(ImageFile::new("a", "IMAGE/PNG", vec![]).is_image());
    assert!(!ImageFile::new("a", "application/pdf", vec![]).is_image());
}
