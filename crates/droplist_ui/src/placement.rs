//! Vertical placement of the popup relative to its anchor.
//!
//! Placement is a pure function of measured geometry and configuration flags,
//! kept apart from the widget so it can be tested without a host.

use crate::constants::{MIN_HEIGHT_GAP, POPUP_GAP, VIEWPORT_MARGIN};
use crate::geometry::AnchorRect;

/// Side of the anchor the popup renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Below,
    Above,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Below => Direction::Above,
            Direction::Above => Direction::Below,
        }
    }
}

/// Where the popup renders and how tall it may grow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PopupGeometry {
    pub direction: Direction,
    /// `None` renders the popup at its natural height.
    pub max_height: Option<f32>,
}

impl PopupGeometry {
    /// Offset of the popup's top edge from the anchor's top edge.
    pub fn offset_top(&self, anchor_height: f32, rendered_height: f32) -> f32 {
        match self.direction {
            Direction::Below => anchor_height + POPUP_GAP,
            Direction::Above => -(rendered_height + POPUP_GAP),
        }
    }
}

/// Everything placement depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementInput {
    pub anchor: AnchorRect,
    pub viewport_height: f32,
    /// Height the popup would take without any constraint.
    pub natural_height: f32,
    pub prefer_above: bool,
    pub auto_flip: bool,
}

impl PlacementInput {
    /// Usable space below the anchor, never negative.
    pub fn space_below(&self) -> f32 {
        ((self.viewport_height - self.anchor.bottom).round() - VIEWPORT_MARGIN).max(0.0)
    }

    /// Usable space above the anchor, never negative.
    pub fn space_above(&self) -> f32 {
        (self.anchor.top.round() - VIEWPORT_MARGIN).max(0.0)
    }

    /// Smallest popup height worth showing in the preferred direction.
    pub fn min_usable_height(&self) -> f32 {
        self.anchor.height * 2.0 + MIN_HEIGHT_GAP
    }

    fn space(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Below => self.space_below(),
            Direction::Above => self.space_above(),
        }
    }
}

/// Compute popup direction and height.
///
/// The popup opens on the preferred side, clamped to the space available
/// there. With `auto_flip`, a clamped height under the minimum usable height
/// moves it to the other side once, clamped again to that side's space.
pub fn compute_placement(input: &PlacementInput) -> PopupGeometry {
    let natural = input.natural_height.max(0.0);
    let preferred = if input.prefer_above {
        Direction::Above
    } else {
        Direction::Below
    };

    let budget = input.space(preferred);
    let mut clamped = natural > budget;
    let mut height = natural.min(budget);
    let mut direction = preferred;

    if input.auto_flip && height < input.min_usable_height() {
        direction = preferred.flipped();
        let budget = input.space(direction);
        clamped |= natural > budget;
        height = natural.min(budget);
    }

    PopupGeometry {
        direction,
        max_height: clamped.then_some(height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor_at(top: f32, height: f32) -> AnchorRect {
        AnchorRect {
            top,
            bottom: top + height,
            height,
        }
    }

    fn input(viewport_height: f32, natural_height: f32, prefer_above: bool, auto_flip: bool) -> PlacementInput {
        PlacementInput {
            anchor: anchor_at(500.0, 40.0),
            viewport_height,
            natural_height,
            prefer_above,
            auto_flip,
        }
    }

    #[test]
    fn test_spaces_and_minimum() {
        let i = input(600.0, 300.0, false, true);
        assert_eq!(i.space_below(), 52.0);
        assert_eq!(i.space_above(), 492.0);
        assert_eq!(i.min_usable_height(), 84.0);
    }

    #[test]
    fn test_flips_above_when_below_is_cramped() {
        let geometry = compute_placement(&input(600.0, 300.0, false, true));
        assert_eq!(
            geometry,
            PopupGeometry {
                direction: Direction::Above,
                max_height: Some(300.0),
            }
        );
    }

    #[test]
    fn test_no_flip_clamps_to_preferred_side() {
        let geometry = compute_placement(&input(560.0, 300.0, false, false));
        assert_eq!(geometry.direction, Direction::Below);
        assert_eq!(geometry.max_height, Some(12.0));
    }

    #[test]
    fn test_fits_without_clamp() {
        let i = PlacementInput {
            anchor: anchor_at(100.0, 40.0),
            viewport_height: 800.0,
            natural_height: 200.0,
            prefer_above: false,
            auto_flip: true,
        };
        assert_eq!(
            compute_placement(&i),
            PopupGeometry {
                direction: Direction::Below,
                max_height: None,
            }
        );
    }

    #[test]
    fn test_clamped_but_usable_keeps_direction() {
        let i = PlacementInput {
            anchor: anchor_at(100.0, 40.0),
            viewport_height: 400.0,
            natural_height: 500.0,
            prefer_above: false,
            auto_flip: true,
        };
        let geometry = compute_placement(&i);
        assert_eq!(geometry.direction, Direction::Below);
        assert_eq!(geometry.max_height, Some(252.0));
    }

    #[test]
    fn test_prefer_above_flips_below() {
        let i = PlacementInput {
            anchor: anchor_at(30.0, 40.0),
            viewport_height: 600.0,
            natural_height: 150.0,
            prefer_above: true,
            auto_flip: true,
        };
        let geometry = compute_placement(&i);
        assert_eq!(geometry.direction, Direction::Below);
        assert_eq!(geometry.max_height, Some(150.0));
    }

    #[test]
    fn test_flips_only_once_when_both_sides_cramped() {
        let i = PlacementInput {
            anchor: anchor_at(50.0, 40.0),
            viewport_height: 140.0,
            natural_height: 300.0,
            prefer_above: false,
            auto_flip: true,
        };
        // Below: 140 - 90 - 8 = 42, above: 50 - 8 = 42, both under 84.
        let geometry = compute_placement(&i);
        assert_eq!(geometry.direction, Direction::Above);
        assert_eq!(geometry.max_height, Some(42.0));
    }

    #[test]
    fn test_cramped_without_auto_flip_stays() {
        let geometry = compute_placement(&input(560.0, 300.0, false, false));
        assert!(geometry.max_height.unwrap_or_default() < 84.0);
        assert_eq!(geometry.direction, Direction::Below);
    }

    #[test]
    fn test_cramped_above_without_auto_flip_stays_above() {
        let i = PlacementInput {
            anchor: anchor_at(50.0, 40.0),
            viewport_height: 800.0,
            natural_height: 300.0,
            prefer_above: true,
            auto_flip: false,
        };
        // Above: 50 - 8 = 42, under the 84 minimum, while below has 702.
        assert_eq!(
            compute_placement(&i),
            PopupGeometry {
                direction: Direction::Above,
                max_height: Some(42.0),
            }
        );
    }

    #[test]
    fn test_degenerate_viewport_collapses() {
        let i = PlacementInput {
            anchor: anchor_at(0.0, 40.0),
            viewport_height: 30.0,
            natural_height: 120.0,
            prefer_above: false,
            auto_flip: true,
        };
        let geometry = compute_placement(&i);
        assert_eq!(geometry.max_height, Some(0.0));
    }

    #[test]
    fn test_placement_is_deterministic() {
        let i = input(600.0, 300.0, false, true);
        let first = compute_placement(&i);
        for _ in 0..10 {
            assert_eq!(compute_placement(&i), first);
        }
    }

    #[test]
    fn test_offset_top() {
        let below = PopupGeometry {
            direction: Direction::Below,
            max_height: None,
        };
        let above = PopupGeometry {
            direction: Direction::Above,
            max_height: Some(120.0),
        };
        assert_eq!(below.offset_top(40.0, 120.0), 44.0);
        assert_eq!(above.offset_top(40.0, 120.0), -124.0);
    }
}
