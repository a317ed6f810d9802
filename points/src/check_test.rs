use super::*;

use crate::validate::R_VALUES;

// --- Shared vertices and corners ---

#[test]
fn origin_is_inside_for_every_r() {
    for r in R_VALUES {
        assert!(is_in_area(0.0, 0.0, r), "origin should be inside at r={r}");
    }
}

#[test]
fn square_far_corner_is_inside() {
    for r in R_VALUES {
        assert!(is_in_area(-r, r, r), "(-r, r) should be inside at r={r}");
    }
}

// --- Square ---

#[test]
fn square_interior_point() {
    assert!(is_in_area(-0.5, 0.5, 1.0));
}

#[test]
fn square_edges_are_inclusive() {
    let r = 3.0;
    assert!(Region::Square.contains(-r, 0.0, r));
    assert!(Region::Square.contains(0.0, r, r));
    assert!(Region::Square.contains(-r, r, r));
}

#[test]
fn square_rejects_past_left_edge() {
    assert!(!Region::Square.contains(-3.1, 1.0, 3.0));
}

#[test]
fn square_rejects_positive_x() {
    assert!(!Region::Square.contains(0.1, 1.0, 3.0));
}

// --- Triangle ---

#[test]
fn triangle_hypotenuse_is_inclusive() {
    // y = -x - r exactly: (-1, -1) at r=2.
    assert!(Region::Triangle.contains(-1.0, -1.0, 2.0));
    assert!(is_in_area(-1.0, -1.0, 2.0));
}

#[test]
fn triangle_below_hypotenuse_is_outside() {
    // (-2, -2) at r=2: the rule y >= -x - r gives -2 >= 0, false.
    assert!(!is_in_area(-2.0, -2.0, 2.0));
}

#[test]
fn triangle_legs_are_inclusive() {
    let r = 2.0;
    assert!(Region::Triangle.contains(-r, 0.0, r));
    assert!(Region::Triangle.contains(0.0, -r, r));
}

#[test]
fn triangle_interior_point() {
    assert!(Region::Triangle.contains(-0.5, -0.5, 2.0));
}

#[test]
fn triangle_rejects_positive_y() {
    assert!(!Region::Triangle.contains(-0.5, 0.5, 2.0));
}

// --- Quarter circle ---

#[test]
fn circle_bounding_corner_is_always_outside() {
    // (r/2, r/2): r^2/2 <= r^2/4 never holds for r > 0.
    for r in R_VALUES {
        assert!(!is_in_area(r / 2.0, r / 2.0, r), "(r/2, r/2) should be outside at r={r}");
    }
}

#[test]
fn circle_vertical_edge_is_inclusive() {
    // (0, r/2): x^2 + y^2 equals r^2/4 exactly.
    for r in R_VALUES {
        assert!(is_in_area(0.0, r / 2.0, r), "(0, r/2) should be inside at r={r}");
    }
}

#[test]
fn circle_interior_point() {
    // 0.09 + 0.09 = 0.18 <= 0.25.
    assert!(is_in_area(0.3, 0.3, 1.0));
}

#[test]
fn circle_rejects_point_past_arc() {
    assert!(!is_in_area(0.4, 0.4, 1.0));
}

#[test]
fn circle_rejects_negative_x() {
    assert!(!Region::QuarterCircle.contains(-0.1, 0.1, 1.0));
}

// --- Union ---

#[test]
fn fourth_quadrant_is_always_outside() {
    for r in R_VALUES {
        assert!(!is_in_area(1.0, -1.0, r), "fourth quadrant at r={r}");
        assert!(!is_in_area(0.5, -0.1, r), "fourth quadrant at r={r}");
    }
}

#[test]
fn point_outside_all_three_regions() {
    assert!(!is_in_area(1.0, 1.0, 1.0));
}

#[test]
fn region_all_covers_union() {
    // Spot-check one representative per region against the union.
    assert!(Region::Square.contains(-1.0, 1.0, 2.0) && is_in_area(-1.0, 1.0, 2.0));
    assert!(Region::Triangle.contains(-0.5, -0.5, 2.0) && is_in_area(-0.5, -0.5, 2.0));
    assert!(Region::QuarterCircle.contains(0.5, 0.5, 2.0) && is_in_area(0.5, 0.5, 2.0));
}

// --- Out-of-domain inputs ---

#[test]
fn out_of_domain_inputs_still_return_a_verdict() {
    assert!(!is_in_area(100.0, 100.0, 3.0));
    assert!(!is_in_area(-1e12, 7.0, 3.0));
    // x outside the discrete grid but geometrically inside the square.
    assert!(is_in_area(-1.5, 1.5, 3.0));
    // y below the form's range; the verdict is still defined.
    assert!(!is_in_area(0.0, -5.5, 5.0));
}

#[test]
fn nan_inputs_are_outside() {
    assert!(!is_in_area(f64::NAN, 0.0, 3.0));
    assert!(!is_in_area(0.0, f64::NAN, 3.0));
    assert!(!is_in_area(0.0, 0.0, f64::NAN));
}
