use super::*;

#[test]
fn card_size_rejects_zero_and_oversized() {
    assert!(CardSize::new(0, 10).is_err());
    assert!(CardSize::new(10, 0).is_err());
    assert!(CardSize::new(70_000, 10).is_err());
    assert_eq!(CardSize::new(350, 500).unwrap(), CardSize::default());
}

#[test]
fn premul_from_straight_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 255, 255, 204);
    assert_eq!(c.to_array(), [204, 204, 204, 204]);
    let c = Rgba8Premul::from_straight_rgba(100, 0, 0, 128);
    assert_eq!(c.r, 50);
}
