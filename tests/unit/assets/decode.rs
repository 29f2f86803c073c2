use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let decoded = decode_image(&buf).unwrap();
    assert_eq!(decoded.width, 1);
    assert_eq!(decoded.height, 1);
    assert_eq!(
        decoded.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_rejects_garbage() {
    let err = decode_image(b"definitely not a png").unwrap_err();
    assert!(matches!(err, CarnetError::Decode(_)));
}

#[test]
fn decode_svg_rasterizes_intrinsic_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2">
        <rect width="4" height="2" fill="#ff0000"/></svg>"##;
    let decoded = decode_for_mime(svg, SVG_MIME).unwrap();
    assert_eq!((decoded.width, decoded.height), (4, 2));
    assert_eq!(&decoded.rgba8_premul[0..4], &[255, 0, 0, 255]);

    assert!(decode_svg(b"<svg").is_err());
}

#[test]
fn from_premul_checks_length() {
    assert!(DecodedImage::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(DecodedImage::from_premul(0, 2, vec![]).is_err());
    assert!(DecodedImage::from_premul(1, 1, vec![0; 4]).is_ok());
}

#[test]
fn mime_guess_by_extension() {
    assert_eq!(mime_for_path(Path::new("a/photo.PNG")), "image/png");
    assert_eq!(mime_for_path(Path::new("photo.jpg")), "image/jpeg");
    assert_eq!(mime_for_path(Path::new("logo.svg")), SVG_MIME);
    assert_eq!(
        mime_for_path(Path::new("notes.txt")),
        "application/octet-stream"
    );
    assert_eq!(mime_for_path(Path::new("README")), "application/octet-stream");
}
