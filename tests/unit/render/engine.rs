use super::*;
use crate::assets::fonts::fixture_font_set;
use crate::foundation::core::CardSize;

fn solid(r: u8, g: u8, b: u8) -> DecodedImage {
    DecodedImage::from_straight(1, 1, vec![r, g, b, 255]).unwrap()
}

fn card() -> CardSurface {
    CardSurface::new(CardSize::default()).unwrap()
}

fn bare_engine() -> CompositingEngine {
    CompositingEngine::new(None).unwrap()
}

#[test]
fn fallback_background_fill_and_border() {
    let mut engine = bare_engine();
    let mut s = card();
    engine.render(&mut s, &RenderModel::default());

    assert_eq!(s.pixel(2, 2), Some([240, 240, 240, 255]));
    assert_eq!(s.pixel(175, 250), Some([240, 240, 240, 255]));
    // Border strokes centered on x = 10 and x = 340 with a 3px line.
    assert_eq!(s.pixel(10, 250), Some([0, 123, 255, 255]));
    assert_eq!(s.pixel(339, 250), Some([0, 123, 255, 255]));
    assert_eq!(s.pixel(175, 10), Some([0, 123, 255, 255]));
    assert_eq!(s.pixel(175, 489), Some([0, 123, 255, 255]));
    assert_eq!(s.pixel(14, 250), Some([240, 240, 240, 255]));
}

#[test]
fn ready_template_replaces_fallback() {
    let mut engine = bare_engine();
    engine.set_image(ImageKind::Template, solid(200, 10, 10));
    let mut s = card();
    engine.render(&mut s, &RenderModel::default());
    assert_eq!(s.pixel(0, 0), Some([200, 10, 10, 255]));
    assert_eq!(s.pixel(10, 250), Some([200, 10, 10, 255]));
    assert_eq!(s.pixel(349, 499), Some([200, 10, 10, 255]));
}

#[test]
fn loading_template_draws_fallback() {
    let mut engine = bare_engine();
    engine.slots_mut().template.begin_load();
    let mut s = card();
    engine.render(&mut s, &RenderModel::default());
    assert_eq!(s.pixel(2, 2), Some([240, 240, 240, 255]));
}

#[test]
fn photo_is_clipped_and_outlined() {
    let mut engine = bare_engine();
    engine.set_image(ImageKind::Photo, solid(0, 200, 0));
    let mut s = card();
    let model = RenderModel::default();
    engine.render(&mut s, &model);

    // Circle centered at (80, 150), radius 50.
    assert_eq!(s.pixel(80, 150), Some([0, 200, 0, 255]));
    assert_eq!(s.pixel(80, 99), Some([255, 255, 255, 255]));
    // Bounding-box corner is outside the circle and its outline.
    assert_eq!(s.pixel(32, 102), Some([240, 240, 240, 255]));
    assert_eq!(s.pixel(128, 198), Some([240, 240, 240, 255]));
}

#[test]
fn photo_outside_clip_is_untouched() {
    let mut with_photo = bare_engine();
    with_photo.set_image(ImageKind::Photo, solid(0, 200, 0));
    let mut a = card();
    with_photo.render(&mut a, &RenderModel::default());

    let mut b = card();
    bare_engine().render(&mut b, &RenderModel::default());

    let (cx, cy, r) = (80.0f64, 150.0f64, 50.0f64);
    for y in 0..500u32 {
        for x in 0..350u32 {
            let (dx, dy) = (f64::from(x) + 0.5 - cx, f64::from(y) + 0.5 - cy);
            if (dx * dx + dy * dy).sqrt() > r + 1.5 + 1.0 {
                assert_eq!(a.pixel(x, y), b.pixel(x, y), "pixel ({x}, {y}) changed");
            }
        }
    }
}

#[test]
fn zero_photo_size_draws_nothing() {
    let mut engine = bare_engine();
    engine.set_image(ImageKind::Photo, solid(0, 200, 0));
    let model = RenderModel {
        photo_size: 0,
        ..RenderModel::default()
    };
    let mut a = card();
    engine.render(&mut a, &model);

    let mut b = card();
    bare_engine().render(&mut b, &model);
    assert_eq!(a.data(), b.data());
    assert!(photo_circle(&model).is_none());
}

#[test]
fn logo_is_stretched_to_its_square() {
    let mut engine = bare_engine();
    engine.set_image(ImageKind::Logo, solid(0, 0, 200));
    let mut s = card();
    engine.render(&mut s, &RenderModel::default());
    assert_eq!(s.pixel(200, 30), Some([0, 0, 200, 255]));
    assert_eq!(s.pixel(259, 89), Some([0, 0, 200, 255]));
    assert_eq!(s.pixel(261, 60), Some([240, 240, 240, 255]));
    assert_eq!(s.pixel(230, 91), Some([240, 240, 240, 255]));
}

#[test]
fn render_is_deterministic() {
    let mut engine = CompositingEngine::new(Some(&fixture_font_set())).unwrap();
    engine.set_image(ImageKind::Photo, solid(10, 20, 30));
    engine.set_image(ImageKind::Logo, solid(90, 80, 70));
    let model = RenderModel {
        name: "Ana".into(),
        position: "Dev".into(),
        department: "IT".into(),
        id_number: "7".into(),
        ..RenderModel::default()
    };
    let mut a = card();
    let mut b = card();
    engine.render(&mut a, &model);
    engine.render(&mut b, &model);
    assert_eq!(a.data(), b.data());

    // Re-rendering onto a dirty surface starts from a clear one.
    b.fill_rect(Rect::new(0.0, 0.0, 350.0, 500.0), CssColor::rgb(1, 1, 1));
    engine.render(&mut b, &model);
    assert_eq!(a.data(), b.data());
}

#[test]
fn shadow_is_reset_after_render() {
    let mut engine = CompositingEngine::new(Some(&fixture_font_set())).unwrap();
    let model = RenderModel {
        name: "Ana".into(),
        ..RenderModel::default()
    };
    let mut s = card();
    engine.render(&mut s, &model);
    assert_eq!(s.shadow(), None);

    s.fill_rect(Rect::new(300.0, 300.0, 320.0, 320.0), CssColor::rgb(255, 0, 0));
    // No halo around the plain fill.
    assert_eq!(s.pixel(321, 321), Some([240, 240, 240, 255]));
}

#[test]
fn empty_field_leaves_other_layers_unchanged() {
    let mut engine = CompositingEngine::new(Some(&fixture_font_set())).unwrap();
    let full = RenderModel {
        name: "Ana López".into(),
        id_number: "123".into(),
        ..RenderModel::default()
    };
    let no_name = RenderModel {
        name: String::new(),
        ..full.clone()
    };
    let mut a = card();
    let mut b = card();
    engine.render(&mut a, &full);
    engine.render(&mut b, &no_name);

    assert_ne!(a.data(), b.data());
    let row = 350 * 4;
    assert_eq!(&a.data()[400 * row..], &b.data()[400 * row..]);
}

#[test]
fn fallback_border_has_square_corners() {
    let mut engine = bare_engine();
    let mut s = card();
    engine.render(&mut s, &RenderModel::default());

    // The miter corner of the border reaches (8.5, 8.5) and (341.5, 491.5).
    assert_eq!(s.pixel(9, 9), Some([0, 123, 255, 255]));
    assert_eq!(s.pixel(340, 490), Some([0, 123, 255, 255]));
    for (x, y) in [(8, 8), (341, 491), (341, 8), (8, 491)] {
        let px = s.pixel(x, y).unwrap();
        assert!(px[0] < 200, "corner ({x}, {y}) has no border ink: {px:?}");
    }
}

#[test]
fn text_halo_falls_below_right_of_glyphs() {
    let mut engine = CompositingEngine::new(Some(&fixture_font_set())).unwrap();
    engine.set_image(ImageKind::Template, solid(0, 0, 0));
    let model = RenderModel {
        name: "MMMM".into(),
        text_color: "#ff0000".into(),
        ..RenderModel::default()
    };
    let mut s = card();
    engine.render(&mut s, &model);

    // Red glyph ink, and the white halo (equal channels, no red) around it.
    let mut ink: Option<(u32, u32, u32, u32)> = None;
    for y in 0..500 {
        for x in 0..350 {
            let px = s.pixel(x, y).unwrap();
            if px[0] > 200 && px[1] < 40 {
                ink = Some(match ink {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    let (x0, y0, x1, y1) = ink.expect("name glyphs painted");
    assert!(x0 >= 100 && y0 >= 250);

    let halo = |x: u32, y: u32| u32::from(s.pixel(x, y).unwrap()[1]);
    let row_sum = |y: u32| (x0..=x1).map(|x| halo(x, y)).sum::<u32>();
    let col_sum = |x: u32| (y0..=y1).map(|y| halo(x, y)).sum::<u32>();
    assert!(row_sum(y1 + 2) > row_sum(y0 - 2), "halo not shifted down");
    assert!(col_sum(x1 + 2) > col_sum(x0 - 2), "halo not shifted right");

    assert!(
        (y0..=y1 + 3).any(|y| {
            let px = s.pixel(x1 + 1, y).unwrap();
            px[1] > 40 && px[1] == px[2]
        }),
        "no white halo just right of the glyphs"
    );
}

#[test]
fn text_draws_follow_layout_rules() {
    let model = RenderModel {
        name: "Ana".into(),
        position: "Dev".into(),
        department: "IT".into(),
        id_number: "42".into(),
        ..RenderModel::default()
    };
    let draws = text_draws(&model, 500);
    assert_eq!(
        draws,
        vec![
            TextDraw {
                text: "Ana".into(),
                origin: Point::new(100.0, 250.0),
                size_px: 20,
                weight: Weight::Bold,
            },
            TextDraw {
                text: "Dev".into(),
                origin: Point::new(100.0, 280.0),
                size_px: 16,
                weight: Weight::Regular,
            },
            TextDraw {
                text: "IT".into(),
                origin: Point::new(100.0, 310.0),
                size_px: 14,
                weight: Weight::Regular,
            },
            TextDraw {
                text: "ID: 42".into(),
                origin: Point::new(30.0, 460.0),
                size_px: 12,
                weight: Weight::Bold,
            },
        ]
    );
}

#[test]
fn text_draws_skip_empty_fields() {
    let model = RenderModel {
        department: "IT".into(),
        ..RenderModel::default()
    };
    let draws = text_draws(&model, 500);
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].text, "IT");
    assert!(text_draws(&RenderModel::default(), 500).is_empty());
}

#[test]
fn id_anchor_tracks_card_height() {
    let model = RenderModel {
        id_number: "X".into(),
        font_size: 4,
        ..RenderModel::default()
    };
    let draws = text_draws(&model, 200);
    assert_eq!(draws[0].origin, Point::new(30.0, 160.0));
    assert_eq!(draws[0].size_px, -2);
}
