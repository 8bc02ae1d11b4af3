//! Scrolling camera
//!
//! The camera is a world-to-screen offset. Adding `offset` to a world
//! position gives its screen position.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, WORLD_HEIGHT, WORLD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    /// Camera already centred on `target`
    pub fn following(target: &Rect) -> Self {
        let mut camera = Self::default();
        camera.update(target);
        camera
    }

    /// Recenter on `target` using the game's world and screen sizes
    pub fn update(&mut self, target: &Rect) {
        self.offset = Self::offset_for(
            target.center(),
            Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        );
    }

    /// Offset that centres `focus` on screen, clamped so the view stays in the world
    pub fn offset_for(focus: Vec2, world: Vec2, screen: Vec2) -> Vec2 {
        let centred = screen / 2.0 - focus;
        // A world smaller than the screen cannot scroll on that axis
        let far = -(world - screen).max(Vec2::ZERO);
        centred.clamp(far, Vec2::ZERO)
    }

    /// Translate a world rect into screen space
    pub fn apply(&self, rect: &Rect) -> Rect {
        rect.translated(self.offset)
    }

    /// The visible window, in world coordinates
    pub fn view(&self) -> Rect {
        Rect {
            pos: -self.offset,
            size: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Vec2 = Vec2::new(1600.0, 600.0);
    const SCREEN: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_centres_player_mid_world() {
        let offset = Camera::offset_for(Vec2::new(800.0, 300.0), WORLD, SCREEN);
        assert_eq!(offset, Vec2::new(-400.0, 0.0));
    }

    #[test]
    fn test_clamps_at_near_edge() {
        let offset = Camera::offset_for(Vec2::new(125.0, 100.0), WORLD, SCREEN);
        assert_eq!(offset, Vec2::ZERO);
    }

    #[test]
    fn test_clamps_at_far_edge() {
        let offset = Camera::offset_for(Vec2::new(1590.0, 575.0), WORLD, SCREEN);
        assert_eq!(offset, Vec2::new(-800.0, 0.0));
    }

    #[test]
    fn test_world_smaller_than_screen() {
        let offset = Camera::offset_for(Vec2::new(50.0, 50.0), Vec2::new(400.0, 300.0), SCREEN);
        assert_eq!(offset, Vec2::ZERO);
    }

    #[test]
    fn test_view_and_apply() {
        let camera = Camera::following(&Rect::new(1000.0, 450.0, 50.0, 50.0));
        let view = camera.view();
        assert_eq!(view.left(), 625.0);
        assert_eq!(view.right(), 1425.0);
        let on_screen = camera.apply(&Rect::new(1000.0, 450.0, 50.0, 50.0));
        assert_eq!(on_screen.pos, Vec2::new(375.0, 450.0));
    }
}
