use super::*;

#[test]
fn parse_int_follows_parseint_rules() {
    assert_eq!(parse_int("42"), Some(42));
    assert_eq!(parse_int("  -7"), Some(-7));
    assert_eq!(parse_int("+5"), Some(5));
    assert_eq!(parse_int("12px"), Some(12));
    assert_eq!(parse_int("3.9"), Some(3));
    assert_eq!(parse_int("0x1A"), Some(26));
    assert_eq!(parse_int("99999999999"), Some(i32::MAX));
    assert_eq!(parse_int("abc"), None);
    assert_eq!(parse_int(""), None);
    assert_eq!(parse_int("-"), None);
    assert_eq!(parse_int("0x"), None);
}

#[test]
fn malformed_number_is_zero_not_layout_default() {
    let mut raw = FormInputs::layout_defaults();
    raw.set(Field::NameX, "abc");
    let m = build_model(&raw);
    assert_eq!(m.name_x, 0);
    assert_eq!(m.name_y, 250);
}

#[test]
fn empty_inputs_coerce_to_zero_with_font_and_color_fallbacks() {
    let m = build_model(&FormInputs::new());
    assert_eq!(m.name, "");
    assert_eq!(m.department, "");
    assert_eq!((m.name_x, m.photo_size, m.logo_size), (0, 0, 0));
    assert_eq!(m.font_size, 18);
    assert_eq!(m.text_color, "#000000");
}

#[test]
fn layout_defaults_round_trip_to_default_model() {
    assert_eq!(
        build_model(&FormInputs::layout_defaults()),
        RenderModel::default()
    );
}

#[test]
fn text_values_are_kept_verbatim() {
    let raw: FormInputs = [("name", "  Ana López "), ("fontSize", "0"), ("textColor", "")]
        .into_iter()
        .collect();
    let m = build_model(&raw);
    assert_eq!(m.name, "  Ana López ");
    assert_eq!(m.font_size, 18);
    assert_eq!(m.text_color, "#000000");
}

#[test]
fn set_key_rejects_unknown_fields() {
    let mut raw = FormInputs::new();
    raw.set_key("logoSize", "75").unwrap();
    assert_eq!(raw.get(Field::LogoSize), Some("75"));
    assert!(matches!(
        raw.set_key("avatar", "x").unwrap_err(),
        CarnetError::Validation(_)
    ));
}

#[test]
fn field_keys_round_trip() {
    for f in Field::ALL {
        assert_eq!(Field::from_key(f.key()), Some(f));
    }
}
