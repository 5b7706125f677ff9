use proptest::prelude::*;

use parcel_geometry::{
    check_vertical_intersection, contour_segments_intersects, point_inside_contour,
    segments_are_collinear, segments_intersect, InclusionType,
};
use parcel_types::{Contour, Point};

fn point() -> impl Strategy<Value = Point> {
    (-1_000_000i64..1_000_000, -1_000_000i64..1_000_000, 0u8..=12)
        .prop_map(|(lat, lon, precision)| Point::with_precision(lat, lon, 0, precision).unwrap())
}

fn grid_point() -> impl Strategy<Value = Point> {
    // Small grid so collinear and touching configurations actually occur.
    (-5i64..5, -5i64..5).prop_map(|(lat, lon)| Point::new(lat * 1_000, lon * 1_000, 0).unwrap())
}

fn contour() -> impl Strategy<Value = Contour> {
    prop::collection::vec(grid_point(), 3..7).prop_map(|pts| Contour::new(pts).unwrap())
}

proptest! {
    /// Collinearity does not depend on which segment is named first.
    #[test]
    fn collinearity_is_symmetric(a1 in point(), a2 in point(), b1 in point(), b2 in point()) {
        prop_assert_eq!(
            segments_are_collinear(&a1, &a2, &b1, &b2),
            segments_are_collinear(&b1, &b2, &a1, &a2)
        );
    }

    /// Reversing a segment's direction does not change collinearity.
    #[test]
    fn collinearity_ignores_direction(a1 in point(), a2 in point(), b1 in point(), b2 in point()) {
        prop_assert_eq!(
            segments_are_collinear(&a1, &a2, &b1, &b2),
            segments_are_collinear(&a2, &a1, &b2, &b1)
        );
    }

    /// Swapping the contours and their segment indices gives the same answer.
    #[test]
    fn intersection_is_symmetric(
        a in contour(),
        b in contour(),
        i in 0usize..7,
        j in 0usize..7,
        exclude in any::<bool>(),
    ) {
        prop_assume!(i < a.len() && j < b.len());
        prop_assert_eq!(
            contour_segments_intersects(&a, &b, i, j, exclude),
            contour_segments_intersects(&b, &a, j, i, exclude)
        );
    }

    /// Excluding collinear overlaps can only remove intersections.
    #[test]
    fn exclusion_never_adds_intersections(
        a1 in grid_point(), a2 in grid_point(), b1 in grid_point(), b2 in grid_point(),
    ) {
        if segments_intersect(&a1, &a2, &b1, &b2, true) {
            prop_assert!(segments_intersect(&a1, &a2, &b1, &b2, false));
        }
    }

    /// A contour's own vertices are on its boundary, never strictly inside.
    #[test]
    fn vertices_are_not_inside_their_own_contour(c in contour(), i in 0usize..7) {
        if i < c.len() {
            prop_assert_eq!(point_inside_contour(&c, &c, InclusionType::AInsideB, i), Ok(false));
        }
    }

    /// Vertical overlap is symmetric for well-formed ranges.
    #[test]
    fn vertical_overlap_is_symmetric(
        low_a in -1_000i32..1_000, len_a in 0i32..500,
        low_b in -1_000i32..1_000, len_b in 0i32..500,
    ) {
        let (high_a, high_b) = (low_a + len_a, low_b + len_b);
        prop_assert_eq!(
            check_vertical_intersection(high_a, low_a, high_b, low_b),
            check_vertical_intersection(high_b, low_b, high_a, low_a)
        );
    }
}
