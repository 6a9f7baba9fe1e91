//! Actor capability contract
//!
//! The browser-automation handle the engine drives. The engine only ever
//! talks to this trait; the connection layer behind it is an external
//! collaborator. `click`, `type_text` and `fill` are the three operations
//! the interception layer overrides; everything else passes through.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::EmulationError;
use crate::geometry::Point;

/// Opaque token identifying a resolved element; its meaning is actor-defined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle(pub String);

/// Fraction of width/height excluded on each side of a bounding box when
/// picking click targets, keeping them away from element edges
const INTERIOR_MARGIN: f64 = 0.1;

/// An element's on-screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The sub-rectangle excluding a 10% margin on each side
    pub fn interior(&self) -> BoundingBox {
        BoundingBox {
            x: self.x + self.width * INTERIOR_MARGIN,
            y: self.y + self.height * INTERIOR_MARGIN,
            width: self.width * (1.0 - 2.0 * INTERIOR_MARGIN),
            height: self.height * (1.0 - 2.0 * INTERIOR_MARGIN),
        }
    }

    /// Uniformly random point inside the interior region
    pub(crate) fn random_interior_point<R: Rng>(&self, rng: &mut R) -> Point {
        let inner = self.interior();
        Point::new(
            inner.x + rng.gen_range(0.0..=1.0) * inner.width,
            inner.y + rng.gen_range(0.0..=1.0) * inner.height,
        )
    }
}

/// Pointer button for click actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

/// Options for a click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClickOptions {
    pub button: MouseButton,
    pub click_count: u32,
}

impl Default for ClickOptions {
    fn default() -> Self {
        Self {
            button: MouseButton::Left,
            click_count: 1,
        }
    }
}

impl ClickOptions {
    /// Set the button
    pub fn button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Set the click count
    pub fn click_count(mut self, count: u32) -> Self {
        self.click_count = count;
        self
    }
}

/// Scroll direction; down is a positive wheel delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    pub(crate) fn sign(self) -> f64 {
        match self {
            ScrollDirection::Down => 1.0,
            ScrollDirection::Up => -1.0,
        }
    }
}

/// Capabilities the emulation engine consumes from the automation layer.
///
/// All methods are fallible; actor-side rejections surface as
/// [`EmulationError::ActorPrimitive`] and pass through the engine unchanged.
#[async_trait]
pub trait Actor: Send + Sync {
    // -- target resolution --

    /// Resolve a selector to an element, or None when nothing matches
    async fn resolve_element(
        &self,
        selector: &str,
    ) -> Result<Option<ElementHandle>, EmulationError>;

    /// Report an element's bounding rectangle, or None when it has no geometry
    async fn bounding_box(
        &self,
        element: &ElementHandle,
    ) -> Result<Option<BoundingBox>, EmulationError>;

    // -- input primitives --

    /// Move the pointer; suspends until the actor acknowledges
    async fn move_pointer(&self, x: f64, y: f64) -> Result<(), EmulationError>;

    async fn click_at(
        &self,
        x: f64,
        y: f64,
        options: &ClickOptions,
    ) -> Result<(), EmulationError>;

    /// Press a key combination, e.g. "Control+A" or "Delete"
    async fn press_key_combo(&self, combo: &str) -> Result<(), EmulationError>;

    async fn type_character(&self, ch: char) -> Result<(), EmulationError>;

    async fn wheel_scroll(&self, dx: f64, dy: f64) -> Result<(), EmulationError>;

    // -- page surface, never intercepted --

    async fn goto(&self, url: &str) -> Result<(), EmulationError>;

    async fn title(&self) -> Result<String, EmulationError>;

    // -- high-level interactions, replaced when emulation is enabled --

    async fn click(&self, selector: &str, options: ClickOptions) -> Result<(), EmulationError>;

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), EmulationError>;

    async fn fill(&self, selector: &str, text: &str) -> Result<(), EmulationError>;
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn interior_excludes_ten_percent_margin() {
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let inner = bounds.interior();

        assert_eq!(inner.x, 10.0);
        assert_eq!(inner.y, 5.0);
        assert_eq!(inner.width, 80.0);
        assert_eq!(inner.height, 40.0);
    }

    #[test]
    fn random_interior_point_stays_inside() {
        let bounds = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1000 {
            let point = bounds.random_interior_point(&mut rng);
            assert!((10.0..=90.0).contains(&point.x), "x out of range: {}", point.x);
            assert!((5.0..=45.0).contains(&point.y), "y out of range: {}", point.y);
        }
    }

    #[test]
    fn random_interior_point_respects_offset_box() {
        let bounds = BoundingBox::new(200.0, 300.0, 40.0, 20.0);
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..500 {
            let point = bounds.random_interior_point(&mut rng);
            assert!((204.0..=236.0).contains(&point.x));
            assert!((302.0..=318.0).contains(&point.y));
        }
    }

    #[test]
    fn click_options_defaults() {
        let options = ClickOptions::default();
        assert_eq!(options.button, MouseButton::Left);
        assert_eq!(options.click_count, 1);

        let double = ClickOptions::default()
            .button(MouseButton::Right)
            .click_count(2);
        assert_eq!(double.button, MouseButton::Right);
        assert_eq!(double.click_count, 2);
    }

    #[test]
    fn scroll_direction_signs() {
        assert_eq!(ScrollDirection::Down.sign(), 1.0);
        assert_eq!(ScrollDirection::Up.sign(), -1.0);
    }
}
