use super::*;

#[test]
fn missing_font_file_is_read_error() {
    let err = FontSet::from_paths(Path::new("target/does-not-exist.ttf"), None).unwrap_err();
    assert!(matches!(err, CarnetError::Read(_)));
}

#[test]
fn bold_falls_back_to_regular() {
    let fonts = FontSet {
        regular: FontFace::new(vec![1, 2, 3], 0),
        bold: None,
    };
    assert_eq!(fonts.face(Weight::Bold).bytes(), &[1, 2, 3]);
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let fonts = FontSet {
        regular: FontFace::new(b"not a font".to_vec(), 0),
        bold: None,
    };
    assert!(TextLayoutEngine::new(&fonts).is_err());
}

#[test]
fn fixture_fonts_load_both_weights() {
    let fonts = fixture_font_set();
    assert!(fonts.bold.is_some());
    assert_ne!(fonts.face(Weight::Bold).bytes(), fonts.face(Weight::Regular).bytes());
}

#[test]
fn shapes_a_single_line() {
    let mut engine = TextLayoutEngine::new(&fixture_font_set()).unwrap();
    let layout = engine
        .layout_line("Ana López", 20.0, Weight::Bold, TextBrushRgba8::default())
        .unwrap();
    assert_eq!(layout.lines().count(), 1);
    assert!(layout.width() > 0.0);

    assert!(
        engine
            .layout_line("x", 0.0, Weight::Regular, TextBrushRgba8::default())
            .is_err()
    );
}
