//! Element module - per-cell state and its animations
//!
//! Each cell of the grid always holds one element. "Removed" elements stay
//! in the vector as inactive placeholders (`is_spawned == false`).
//! Animations are resumable timed steps advanced by `advance(dt)`:
//! a fall movement (the only thing `is_moving` refers to) and a scale
//! transition (spawn scale-in, despawn scale-out). A despawn scale-out
//! deactivates the element only when it completes, so gravity scans never
//! see a cell as empty before its vacating animation has finished.

use crate::types::{ElementColor, Vec2};

/// In-flight fall movement
#[derive(Debug, Clone, Copy, PartialEq)]
struct MoveAnimation {
    from: Vec2,
    to: Vec2,
    duration: f32,
    elapsed: f32,
    /// Remaining distance below this snaps straight to the target
    snap_threshold: f32,
}

/// In-flight scale transition
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScaleAnimation {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    /// Despawn scale-outs deactivate the element on completion
    deactivate_on_done: bool,
}

/// A single grid element
#[derive(Debug, Clone, PartialEq)]
pub struct GridElement {
    color: ElementColor,
    is_spawned: bool,
    is_moving: bool,
    position: Vec2,
    scale: f32,
    move_anim: Option<MoveAnimation>,
    scale_anim: Option<ScaleAnimation>,
}

impl GridElement {
    /// Create a spawned element at rest
    pub(crate) fn new(color: ElementColor, position: Vec2) -> Self {
        Self {
            color,
            is_spawned: true,
            is_moving: false,
            position,
            scale: 1.0,
            move_anim: None,
            scale_anim: None,
        }
    }

    pub fn color(&self) -> ElementColor {
        self.color
    }

    /// Whether the element is active (visible) or a placeholder
    pub fn is_spawned(&self) -> bool {
        self.is_spawned
    }

    /// Whether the element is mid-fall
    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    /// Current world position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current visual scale
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub(crate) fn set_color(&mut self, color: ElementColor) {
        self.color = color;
    }

    /// Relocate without animating (placeholder side of a gravity swap)
    pub(crate) fn teleport(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Begin an animated fall to `to` over `duration` seconds
    pub(crate) fn begin_move(&mut self, to: Vec2, duration: f32, snap_threshold: f32) {
        debug_assert!(!self.is_moving, "element already mid-fall");
        self.is_moving = true;
        self.move_anim = Some(MoveAnimation {
            from: self.position,
            to,
            duration,
            elapsed: 0.0,
            snap_threshold,
        });
    }

    /// Activate and begin the scale-in animation
    pub(crate) fn begin_spawn(&mut self, start_scale: f32, duration: f32) {
        self.is_spawned = true;
        self.scale = start_scale;
        self.scale_anim = Some(ScaleAnimation {
            from: start_scale,
            to: 1.0,
            duration,
            elapsed: 0.0,
            deactivate_on_done: false,
        });
    }

    /// Begin the scale-out animation; the element stays spawned until the
    /// animation completes
    pub(crate) fn begin_despawn(&mut self, end_scale: f32, duration: f32) {
        self.scale_anim = Some(ScaleAnimation {
            from: 1.0,
            to: end_scale,
            duration,
            elapsed: 0.0,
            deactivate_on_done: true,
        });
    }

    /// Advance in-flight animations by `dt` seconds
    pub(crate) fn advance(&mut self, dt: f32) {
        if let Some(mut anim) = self.move_anim.take() {
            anim.elapsed += dt;
            let progress = if anim.duration <= 0.0 {
                1.0
            } else {
                (anim.elapsed / anim.duration).clamp(0.0, 1.0)
            };
            self.position = Vec2::lerp(anim.from, anim.to, progress);

            let arrived =
                progress >= 1.0 || self.position.distance(anim.to) <= anim.snap_threshold;
            if arrived {
                self.position = anim.to;
                self.is_moving = false;
            } else {
                self.move_anim = Some(anim);
            }
        }

        if let Some(mut anim) = self.scale_anim.take() {
            anim.elapsed += dt;
            let progress = if anim.duration <= 0.0 {
                1.0
            } else {
                (anim.elapsed / anim.duration).clamp(0.0, 1.0)
            };
            self.scale = anim.from + (anim.to - anim.from) * progress;

            if progress >= 1.0 {
                self.scale = anim.to;
                if anim.deactivate_on_done {
                    self.is_spawned = false;
                }
            } else {
                self.scale_anim = Some(anim);
            }
        }
    }

    /// Force the spawned flag (unit-test setup)
    #[cfg(test)]
    pub(crate) fn set_spawned(&mut self, spawned: bool) {
        self.is_spawned = spawned;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_completes_and_clears_flag() {
        let mut element = GridElement::new(ElementColor::Red, Vec2::ZERO);
        element.begin_move(Vec2::new(0.0, -2.0), 0.4, 0.01);
        assert!(element.is_moving());

        element.advance(0.2);
        assert!(element.is_moving());
        assert!(element.position().y < 0.0 && element.position().y > -2.0);

        element.advance(0.2);
        assert!(!element.is_moving());
        assert_eq!(element.position(), Vec2::new(0.0, -2.0));
    }

    #[test]
    fn test_move_snaps_within_threshold() {
        let mut element = GridElement::new(ElementColor::Blue, Vec2::ZERO);
        element.begin_move(Vec2::new(0.0, -1.0), 1.0, 0.05);

        // 0.96 of the way leaves 0.04 remaining, inside the 0.05 threshold
        element.advance(0.96);
        assert!(!element.is_moving());
        assert_eq!(element.position(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_zero_duration_move_completes_next_tick() {
        let mut element = GridElement::new(ElementColor::Green, Vec2::ZERO);
        element.begin_move(Vec2::new(1.0, 0.0), 0.0, 0.01);
        assert!(element.is_moving());

        element.advance(0.016);
        assert!(!element.is_moving());
        assert_eq!(element.position(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_despawn_deactivates_only_at_completion() {
        let mut element = GridElement::new(ElementColor::Yellow, Vec2::ZERO);
        element.begin_despawn(0.1, 0.25);
        assert!(element.is_spawned(), "still spawned while shrinking");

        element.advance(0.1);
        assert!(element.is_spawned());
        assert!(element.scale() < 1.0);

        element.advance(0.15);
        assert!(!element.is_spawned());
        assert_eq!(element.scale(), 0.1);
    }

    #[test]
    fn test_spawn_activates_immediately_and_scales_in() {
        let mut element = GridElement::new(ElementColor::Purple, Vec2::ZERO);
        element.set_spawned(false);

        element.begin_spawn(0.1, 0.25);
        assert!(element.is_spawned(), "active as soon as the spawn starts");
        assert_eq!(element.scale(), 0.1);

        element.advance(0.25);
        assert!(element.is_spawned());
        assert_eq!(element.scale(), 1.0);
    }

    #[test]
    fn test_scale_does_not_affect_is_moving() {
        let mut element = GridElement::new(ElementColor::Red, Vec2::ZERO);
        element.begin_despawn(0.1, 0.25);
        assert!(!element.is_moving());
    }
}
