//! Pointer-to-fraction coordinate mapping.
//!
//! Converts raw pointer positions into normalized `[0, 1]` coordinates
//! relative to a container rectangle measured in the same space.

use crate::model::Position;

/// A raw pointer position in screen (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Bounding rectangle of the interactive container, same space as [`PointerPos`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// True when neither axis can be used as a divisor.
    pub fn is_degenerate(&self) -> bool {
        !usable_extent(self.width) && !usable_extent(self.height)
    }
}

/// Result of mapping a pointer position.
///
/// An axis is `None` when it could not be mapped (zero or non-finite extent,
/// non-finite pointer coordinate). Callers keep the previous coordinate for
/// that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedFraction {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl MappedFraction {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }

    /// Fill unmapped axes from `previous`. Returns `None` if nothing mapped.
    pub fn resolve(&self, previous: Position) -> Option<Position> {
        if self.is_empty() {
            return None;
        }
        Some(Position::new(
            self.x.unwrap_or(previous.x),
            self.y.unwrap_or(previous.y),
        ))
    }
}

fn usable_extent(extent: f32) -> bool {
    extent.is_finite() && extent > 0.0
}

fn map_axis(pointer: f32, origin: f32, extent: f32) -> Option<f32> {
    if !usable_extent(extent) || !pointer.is_finite() || !origin.is_finite() {
        return None;
    }
    let raw = (pointer - origin) / extent;
    if raw.is_nan() {
        return None;
    }
    Some(raw.clamp(0.0, 1.0))
}

/// Map a pointer position into `[0, 1] x [0, 1]` fractions of `rect`.
///
/// Each axis is clamped independently, so a pointer far outside the
/// container pins to the nearest edge.
pub fn map_pointer_to_fraction(pointer: PointerPos, rect: &ContainerRect) -> MappedFraction {
    MappedFraction {
        x: map_axis(pointer.x, rect.left, rect.width),
        y: map_axis(pointer.y, rect.top, rect.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect() -> ContainerRect {
        ContainerRect::new(100.0, 50.0, 200.0, 400.0)
    }

    #[test]
    fn test_inside_maps_proportionally() {
        let m = map_pointer_to_fraction(PointerPos::new(150.0, 150.0), &rect());
        assert_eq!(m.x, Some(0.25));
        assert_eq!(m.y, Some(0.25));
    }

    #[test]
    fn test_left_of_container_pins_to_zero() {
        let r = rect();
        let m = map_pointer_to_fraction(PointerPos::new(r.left - 50.0, 60.0), &r);
        assert_eq!(m.x, Some(0.0));
    }

    #[test]
    fn test_far_bottom_right_pins_to_one() {
        let m = map_pointer_to_fraction(PointerPos::new(10_000.0, 10_000.0), &rect());
        assert_eq!(m.x, Some(1.0));
        assert_eq!(m.y, Some(1.0));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let r = rect();
        let m = map_pointer_to_fraction(PointerPos::new(r.left, r.top + r.height), &r);
        assert_eq!(m.x, Some(0.0));
        assert_eq!(m.y, Some(1.0));
    }

    #[test]
    fn test_zero_width_leaves_x_unmapped() {
        let r = ContainerRect::new(0.0, 0.0, 0.0, 100.0);
        let m = map_pointer_to_fraction(PointerPos::new(10.0, 25.0), &r);
        assert_eq!(m.x, None);
        assert_eq!(m.y, Some(0.25));
        assert!(!r.is_degenerate());
    }

    #[test]
    fn test_zero_rect_is_empty() {
        let r = ContainerRect::new(0.0, 0.0, 0.0, 0.0);
        let m = map_pointer_to_fraction(PointerPos::new(10.0, 25.0), &r);
        assert!(m.is_empty());
        assert!(r.is_degenerate());
        assert_eq!(m.resolve(Position::new(0.3, 0.4)), None);
    }

    #[test]
    fn test_non_finite_pointer_is_unmapped() {
        let m = map_pointer_to_fraction(PointerPos::new(f32::NAN, f32::INFINITY), &rect());
        assert!(m.is_empty());
    }

    #[test]
    fn test_resolve_retains_previous_axis() {
        let m = MappedFraction {
            x: None,
            y: Some(0.9),
        };
        assert_eq!(
            m.resolve(Position::new(0.3, 0.4)),
            Some(Position::new(0.3, 0.9))
        );
    }

    proptest! {
        #[test]
        fn prop_mapped_axes_stay_in_unit_range(
            px in -1.0e6f32..1.0e6,
            py in -1.0e6f32..1.0e6,
            left in -1.0e4f32..1.0e4,
            top in -1.0e4f32..1.0e4,
            width in 0.01f32..1.0e4,
            height in 0.01f32..1.0e4,
        ) {
            let m = map_pointer_to_fraction(
                PointerPos::new(px, py),
                &ContainerRect::new(left, top, width, height),
            );
            let x = m.x.expect("x maps with positive width");
            let y = m.y.expect("y maps with positive height");
            prop_assert!((0.0..=1.0).contains(&x));
            prop_assert!((0.0..=1.0).contains(&y));
        }

        #[test]
        fn prop_mapping_is_monotonic_in_x(
            a in -1.0e4f32..1.0e4,
            b in -1.0e4f32..1.0e4,
        ) {
            let r = ContainerRect::new(0.0, 0.0, 300.0, 300.0);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let ml = map_pointer_to_fraction(PointerPos::new(lo, 0.0), &r);
            let mh = map_pointer_to_fraction(PointerPos::new(hi, 0.0), &r);
            prop_assert!(ml.x.unwrap() <= mh.x.unwrap());
        }
    }
}
