// Sizing behavior through the public Region API
use regionops::{CornerMode, LayerId, Point, Region};

fn rect(x1: i32, y1: i32, x2: i32, y2: i32) -> Region {
    Region::new(
        LayerId::new(1, 0),
        vec![vec![
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ]],
    )
}

#[test]
fn test_square_grow_and_shrink() {
    let a = rect(0, 0, 100, 100);

    let grown = a.sized(10, CornerMode::Square);
    assert_eq!(grown.area(), 14400.0, "grow by 10 -> 120x120");

    let shrunk = a.sized(-20, CornerMode::Square);
    assert_eq!(shrunk.area(), 3600.0, "shrink by 20 -> 60x60");
}

#[test]
fn test_shrink_past_half_extent_empties() {
    let a = rect(0, 0, 100, 100);
    assert!(a.sized(-60, CornerMode::Square).is_empty());
    assert!(a.sized(-60, CornerMode::Octagonal).is_empty());
    assert!(a.sized(-60, CornerMode::Round { segments: 8 }).is_empty());
}

#[test]
fn test_zero_sizing_is_identity() {
    let a = rect(3, 7, 91, 64);
    let same = a.sized(0, CornerMode::Round { segments: 16 });
    assert_eq!(same, a);
}

#[test]
fn test_corner_mode_area_ordering() {
    let a = rect(0, 0, 1000, 1000);
    let square = a.sized(100, CornerMode::Square).area();
    let octagonal = a.sized(100, CornerMode::Octagonal).area();
    let round = a.sized(100, CornerMode::Round { segments: 16 }).area();

    assert!(square >= octagonal, "square {square} < octagonal {octagonal}");
    assert!(octagonal >= round, "octagonal {octagonal} < round {round}");

    // Square is the exact Minkowski sum with a square
    assert_eq!(square, 1200.0 * 1200.0);
    // Round stays above the un-filleted core and below the disk sum
    let disk_sum = 1000.0 * 1000.0
        + 4.0 * 1000.0 * 100.0
        + std::f64::consts::PI * 100.0 * 100.0;
    assert!(round < disk_sum);
    assert!(round > 1000.0 * 1000.0 + 4.0 * 1000.0 * 100.0);
}

#[test]
fn test_shrink_only_miters() {
    // Shrinking a convex ring has no corners on the displacement side, so
    // every mode gives the same rectangle
    let a = rect(0, 0, 100, 100);
    let sq = a.sized(-10, CornerMode::Square);
    let oct = a.sized(-10, CornerMode::Octagonal);
    let round = a.sized(-10, CornerMode::Round { segments: 8 });
    assert_eq!(sq.area(), 6400.0);
    assert_eq!(oct.area(), 6400.0);
    assert_eq!(round.area(), 6400.0);
}

#[test]
fn test_multiple_rings_sized_independently() {
    let region = Region::new(
        LayerId::new(1, 0),
        vec![
            vec![
                Point::new(0, 0),
                Point::new(100, 0),
                Point::new(100, 100),
                Point::new(0, 100),
            ],
            vec![
                Point::new(500, 0),
                Point::new(540, 0),
                Point::new(540, 40),
                Point::new(500, 40),
            ],
        ],
    );

    // Shrinking by 25 kills the 40x40 ring but keeps the 100x100 one
    let shrunk = region.sized(-25, CornerMode::Square);
    assert_eq!(shrunk.ring_count(), 1);
    assert_eq!(shrunk.area(), 2500.0);
}

#[test]
fn test_sizing_composes_with_boolean_ops() {
    let a = rect(0, 0, 100, 100);
    let b = rect(120, 0, 220, 100);

    // Growing both by 15 closes the 20 DBU gap; the union is one ring
    let merged = a.sized(15, CornerMode::Square).or(&b.sized(15, CornerMode::Square));
    assert_eq!(merged.ring_count(), 1);

    // Ungrown, they stay apart
    let apart = a.or(&b);
    assert_eq!(apart.ring_count(), 2);
}

#[test]
fn test_grow_shrink_round_trip_on_rectangle() {
    let a = rect(0, 0, 100, 100);
    let back = a
        .sized(30, CornerMode::Square)
        .sized(-30, CornerMode::Square);
    assert_eq!(back.area(), 10000.0);
}
