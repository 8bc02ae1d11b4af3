//! Scene drawing
//!
//! Translates the simulation state into renderer calls. World rectangles are
//! moved into screen space by the camera; anything outside the view is culled.

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::highscores::HighScores;
use crate::platform::{Color, Renderer};
use crate::sim::{CollectibleKind, EntityKind, GamePhase, GameState, Rect};

pub const BACKGROUND: Color = Color::WHITE;
pub const HUD_TEXT: Color = Color::BLACK;

/// Fill colour for an entity kind
pub fn color_of(kind: &EntityKind) -> Color {
    match kind {
        EntityKind::Projectile => Color::RED,
        EntityKind::Enemy => Color::RED,
        EntityKind::Boss { .. } => Color::PURPLE,
        EntityKind::Collectible(CollectibleKind::Health) => Color::GREEN,
        EntityKind::Collectible(CollectibleKind::Life) => Color::BLUE,
    }
}

pub const PLAYER_COLOR: Color = Color::BLUE;

/// Draw one complete frame
pub fn draw(
    state: &GameState,
    renderer: &mut impl Renderer,
    show_hud: bool,
    high_scores: &HighScores,
) {
    renderer.clear(BACKGROUND);

    let view = state.camera.view();
    for entity in state.world.entities() {
        draw_world_rect(state, renderer, &view, &entity.body.rect, color_of(&entity.kind));
    }
    draw_world_rect(state, renderer, &view, &state.world.player.body.rect, PLAYER_COLOR);

    if show_hud {
        draw_hud(state, renderer);
    }
    if let GamePhase::GameOver { won } = state.phase {
        draw_game_over(renderer, won, high_scores);
    }

    renderer.present();
}

fn draw_world_rect(
    state: &GameState,
    renderer: &mut impl Renderer,
    view: &Rect,
    rect: &Rect,
    color: Color,
) {
    if !view.intersects(rect) {
        return;
    }
    let on_screen = state.camera.apply(rect);
    renderer.draw_rect(on_screen.pos, on_screen.size, color);
}

fn draw_hud(state: &GameState, renderer: &mut impl Renderer) {
    let player = &state.world.player;
    let lines = [
        format!("Score: {}", player.score),
        format!("Health: {}", player.health),
        format!("Lives: {}", player.lives),
        format!("Level: {}", state.level),
    ];
    for (i, line) in lines.iter().enumerate() {
        renderer.draw_text(Vec2::new(10.0, 10.0 + 30.0 * i as f32), line, HUD_TEXT);
    }

    if state.boss_health_display > 0 {
        renderer.draw_text(
            Vec2::new(SCREEN_WIDTH - 200.0, 10.0),
            &format!("Boss Health: {}", state.boss_health_display),
            HUD_TEXT,
        );
    }
}

fn draw_game_over(renderer: &mut impl Renderer, won: bool, high_scores: &HighScores) {
    let origin = Vec2::new(SCREEN_WIDTH / 2.0 - 200.0, SCREEN_HEIGHT / 2.0);
    let (banner, color) = if won {
        ("You won! Press R to restart", Color::GREEN)
    } else {
        ("GAME OVER! Press R to restart", Color::RED)
    };
    renderer.draw_text(origin, banner, color);

    if let Some(best) = high_scores.top() {
        renderer.draw_text(
            origin + Vec2::new(0.0, 30.0),
            &format!("Best: {} (level {})", best.score, best.level),
            HUD_TEXT,
        );
    }
}
