// Algebraic properties of the Boolean operators on regions
use regionops::{LayerId, Point, Region};

fn layer() -> LayerId {
    LayerId::new(1, 0)
}

fn rect(x1: i32, y1: i32, x2: i32, y2: i32) -> Region {
    Region::new(
        layer(),
        vec![vec![
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ]],
    )
}

#[test]
fn test_overlapping_rectangles_exact_areas() {
    let a = rect(0, 0, 100, 100);
    let b = rect(50, 0, 150, 100);

    assert_eq!(a.or(&b).area(), 15000.0, "union area");
    assert_eq!(a.and(&b).area(), 5000.0, "intersection area");
    assert_eq!(a.xor(&b).area(), 10000.0, "symmetric difference area");
    assert_eq!(a.not(&b).area(), 5000.0, "difference area");
}

#[test]
fn test_inclusion_exclusion() {
    let cases = [
        (rect(0, 0, 100, 100), rect(50, 0, 150, 100)),
        (rect(0, 0, 100, 100), rect(30, 30, 70, 170)),
        (
            rect(0, 0, 200, 50),
            Region::new(
                layer(),
                vec![vec![
                    Point::new(40, 10),
                    Point::new(160, 10),
                    Point::new(100, 120),
                ]],
            ),
        ),
    ];
    for (a, b) in &cases {
        let lhs = a.or(b).area() + a.and(b).area();
        let rhs = a.area() + b.area();
        assert!(
            (lhs - rhs).abs() < 1e-6,
            "inclusion-exclusion broken: {lhs} vs {rhs}"
        );
        // xor is the union minus the intersection
        let xor = a.xor(b).area();
        let expected = a.or(b).area() - a.and(b).area();
        assert!((xor - expected).abs() < 1e-6, "xor {xor} vs {expected}");
    }
}

#[test]
fn test_touching_rectangles_merge_into_one_ring() {
    let a = rect(0, 0, 100, 100);
    let b = rect(100, 0, 200, 100);

    let merged = a.or(&b);
    assert_eq!(merged.ring_count(), 1, "edge-touching polygons must merge");
    assert_eq!(merged.area(), 20000.0);
    // The shared boundary leaves no trace: a plain 4-corner rectangle
    assert_eq!(merged.edge_count(), 4);

    // The same pair does not intersect with any area
    assert_eq!(a.and(&b).area(), 0.0);
}

#[test]
fn test_disjoint_rectangles_stay_separate() {
    let a = rect(0, 0, 100, 100);
    let b = rect(300, 0, 400, 100);

    let both = a.or(&b);
    assert_eq!(both.ring_count(), 2);
    assert_eq!(both.area(), 20000.0);

    assert!(a.and(&b).is_empty());
    assert!(a.xor(&b).area() == 20000.0);
    assert_eq!(a.not(&b).area(), a.area(), "difference with disjoint is identity");
}

#[test]
fn test_identical_operands() {
    let a = rect(0, 0, 100, 100);
    let b = rect(0, 0, 100, 100);

    assert_eq!(a.or(&b).area(), 10000.0);
    assert_eq!(a.and(&b).area(), 10000.0);
    assert!(a.xor(&b).is_empty(), "xor of identical regions is empty");
    assert!(a.not(&b).is_empty(), "difference of identical regions is empty");
}

#[test]
fn test_empty_region_identities() {
    let a = rect(0, 0, 100, 100);
    let empty = Region::empty(layer());

    assert_eq!(a.or(&empty).area(), a.area());
    assert_eq!(empty.or(&a).area(), a.area());
    assert!(a.and(&empty).is_empty());
    assert!(empty.and(&a).is_empty());
    assert_eq!(a.not(&empty).area(), a.area());
    assert!(empty.not(&a).is_empty());
    assert_eq!(a.xor(&empty).area(), a.area());
}

#[test]
fn test_commutativity_of_or_and_xor() {
    let a = rect(0, 0, 100, 100);
    let b = rect(30, 40, 170, 90);

    assert_eq!(a.or(&b).area(), b.or(&a).area());
    assert_eq!(a.and(&b).area(), b.and(&a).area());
    assert_eq!(a.xor(&b).area(), b.xor(&a).area());
}

#[test]
fn test_contained_hole_is_keyholed() {
    let outer = rect(0, 0, 100, 100);
    let inner = rect(25, 25, 75, 75);

    let donut = outer.not(&inner);
    assert_eq!(donut.area(), 7500.0);
    // The hole is connected to the outer boundary by a zero-width cut,
    // so a single ring carries the whole shape
    assert_eq!(donut.ring_count(), 1);

    // Adding the hole back restores the full square
    assert_eq!(donut.or(&inner).area(), 10000.0);
}

#[test]
fn test_concave_intersection() {
    // L-shape intersected with a rectangle spanning its notch
    let l_shape = Region::new(
        layer(),
        vec![vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 25),
            Point::new(25, 25),
            Point::new(25, 100),
            Point::new(0, 100),
        ]],
    );
    let band = rect(0, 10, 100, 60);

    let cut = l_shape.and(&band);
    // 100x15 strip plus the 25-wide arm from y=25 to 60
    assert_eq!(cut.area(), 100.0 * 15.0 + 25.0 * 35.0);
}

#[test]
fn test_results_compose() {
    let a = rect(0, 0, 100, 100);
    let b = rect(50, 0, 150, 100);
    let c = rect(0, 50, 150, 150);

    // (a | b) & c equals (a & c) | (b & c)
    let lhs = a.or(&b).and(&c);
    let rhs = a.and(&c).or(&b.and(&c));
    assert_eq!(lhs.area(), rhs.area());
    assert_eq!(lhs.area(), 7500.0);
}

#[test]
fn test_triangle_union_with_rectangle() {
    let base = rect(0, 0, 200, 20);
    let tri = Region::new(
        layer(),
        vec![vec![
            Point::new(0, 20),
            Point::new(200, 20),
            Point::new(100, 120),
        ]],
    );

    let merged = base.or(&tri);
    assert_eq!(merged.ring_count(), 1);
    assert_eq!(merged.area(), 200.0 * 20.0 + 200.0 * 100.0 / 2.0);
}
