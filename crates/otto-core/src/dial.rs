//! Radial rating dial.
//!
//! Ten ticks spaced 36° apart, value 1 at the top (-90°) and increasing
//! clockwise in screen coordinates (y grows downward). A drag gesture only
//! produces a provisional value; the caller commits it on release.

use serde::Serialize;

pub const DIAL_MIN: u8 = 1;
pub const DIAL_MAX: u8 = 10;
pub const STEP_DEGREES: f64 = 36.0;

/// Screen-space point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Angle of a tick, in degrees.
pub fn value_to_angle(value: u8) -> f64 {
    -90.0 + f64::from(value.saturating_sub(1)) * STEP_DEGREES
}

pub fn polar_to_cartesian(center: Point, radius: f64, angle_degrees: f64) -> Point {
    let rad = angle_degrees.to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// Quantize a pointer position to the nearest tick value.
pub fn position_to_value(pointer: Point, center: Point) -> u8 {
    let degrees = (pointer.y - center.y).atan2(pointer.x - center.x).to_degrees();
    // rotate so the top of the dial is zero
    let rotated = (degrees + 360.0 + 90.0) % 360.0;
    let value = (rotated / STEP_DEGREES).round() as i64 + 1;
    value.clamp(i64::from(DIAL_MIN), i64::from(DIAL_MAX)) as u8
}

/// Render model for the dial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialVisual {
    /// `active[i]` is tick `i + 1`.
    pub active: [bool; 10],
    pub knob: Point,
    pub label: Option<u8>,
}

/// Dial geometry plus the in-progress gesture.
#[derive(Debug, Clone)]
pub struct RadialDial {
    center: Point,
    radius: f64,
    pressed: bool,
    provisional: Option<u8>,
}

impl Default for RadialDial {
    fn default() -> Self {
        Self::new(Point::new(110.0, 110.0), 90.0)
    }
}

impl RadialDial {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            pressed: false,
            provisional: None,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn provisional(&self) -> Option<u8> {
        self.provisional
    }

    /// Begin a gesture. No value is established until the pointer moves.
    pub fn press(&mut self) {
        self.pressed = true;
        self.provisional = None;
    }

    /// Track the pointer while pressed; ignored otherwise.
    pub fn move_to(&mut self, pointer: Point) -> Option<u8> {
        if !self.pressed {
            return None;
        }
        let value = position_to_value(pointer, self.center);
        self.provisional = Some(value);
        Some(value)
    }

    /// End the gesture and hand back the value to commit, if any.
    pub fn release(&mut self) -> Option<u8> {
        if !self.pressed {
            return None;
        }
        self.pressed = false;
        self.provisional.take()
    }

    /// Pointer cancel ends the gesture exactly like a release.
    pub fn cancel(&mut self) -> Option<u8> {
        self.release()
    }

    /// Where a tick sits on the track.
    pub fn tick_position(&self, value: u8) -> Point {
        polar_to_cartesian(self.center, self.radius, value_to_angle(value))
    }

    /// Visual state for `value`; the provisional value wins while dragging.
    pub fn visual(&self, committed: Option<u8>) -> DialVisual {
        let value = self
            .provisional
            .or(committed)
            .filter(|v| (DIAL_MIN..=DIAL_MAX).contains(v));
        let mut active = [false; 10];
        if let Some(v) = value {
            for slot in active.iter_mut().take(usize::from(v)) {
                *slot = true;
            }
        }
        let knob = match value {
            Some(v) => self.tick_position(v),
            None => polar_to_cartesian(self.center, self.radius, -90.0),
        };
        DialVisual {
            active,
            knob,
            label: value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_positions_round_trip() {
        let dial = RadialDial::default();
        for value in DIAL_MIN..=DIAL_MAX {
            let pos = dial.tick_position(value);
            assert_eq!(position_to_value(pos, dial.center()), value);
        }
    }

    #[test]
    fn cardinal_points_map_to_ticks() {
        let c = Point::new(0.0, 0.0);
        assert_eq!(position_to_value(Point::new(0.0, -50.0), c), 1);
        // 90° from the top sits halfway between ticks 3 (72°) and 4 (108°)
        assert_eq!(position_to_value(Point::new(50.0, 0.0), c), 4);
        assert_eq!(position_to_value(Point::new(0.0, 50.0), c), 6);
    }

    #[test]
    fn just_left_of_top_clamps_to_ten() {
        let c = Point::new(0.0, 0.0);
        // ~350° from the top rounds to step 10, clamped
        let p = polar_to_cartesian(c, 50.0, -100.0);
        assert_eq!(position_to_value(p, c), 10);
    }

    #[test]
    fn release_without_move_commits_nothing() {
        let mut dial = RadialDial::default();
        dial.press();
        assert_eq!(dial.release(), None);
        assert!(!dial.is_pressed());
    }

    #[test]
    fn drag_commits_last_value_on_release() {
        let mut dial = RadialDial::default();
        dial.press();
        dial.move_to(dial.tick_position(3));
        assert_eq!(dial.move_to(dial.tick_position(7)), Some(7));
        assert_eq!(dial.provisional(), Some(7));
        assert_eq!(dial.release(), Some(7));
        assert_eq!(dial.provisional(), None);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut dial = RadialDial::default();
        assert_eq!(dial.move_to(dial.tick_position(5)), None);
        assert_eq!(dial.cancel(), None);
    }

    #[test]
    fn visual_marks_ticks_up_to_value() {
        let dial = RadialDial::default();
        let visual = dial.visual(Some(4));
        assert_eq!(
            visual.active,
            [true, true, true, true, false, false, false, false, false, false]
        );
        assert_eq!(visual.label, Some(4));
    }

    #[test]
    fn no_value_parks_knob_at_top() {
        let dial = RadialDial::default();
        let visual = dial.visual(None);
        assert!(visual.active.iter().all(|a| !a));
        assert_eq!(visual.label, None);
        assert!((visual.knob.x - 110.0).abs() < 1e-9);
        assert!((visual.knob.y - 20.0).abs() < 1e-9);
    }
}
