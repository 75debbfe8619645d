use super::*;

#[test]
fn domain_rejects_zero_sides() {
    assert!(matches!(
        Domain::new(0, 4),
        Err(DissolveError::InvalidDomain(_))
    ));
    assert!(matches!(
        Domain::new(4, 0),
        Err(DissolveError::InvalidDomain(_))
    ));
    assert_eq!(Domain::new(3, 5).unwrap().pixel_count(), 15);
}

#[test]
fn coord_at_discards_padding_and_overflow() {
    let d = Domain::new(3, 2).unwrap();
    assert_eq!(d.coord_at(0, 4), Some(Coord::new(0, 0)));
    assert_eq!(d.coord_at(2, 4), Some(Coord::new(2, 0)));
    assert_eq!(d.coord_at(3, 4), None);
    assert_eq!(d.coord_at(6, 4), Some(Coord::new(2, 1)));
    assert_eq!(d.coord_at(8, 4), None);
    assert_eq!(d.coord_at(0, 0), None);
}

#[test]
fn offset_is_row_major() {
    let d = Domain::new(4, 3).unwrap();
    assert_eq!(d.offset_of(Coord::new(0, 0)), 0);
    assert_eq!(d.offset_of(Coord::new(3, 0)), 3);
    assert_eq!(d.offset_of(Coord::new(1, 2)), 9);
    assert!(d.contains(Coord::new(3, 2)));
    assert!(!d.contains(Coord::new(4, 2)));
}
