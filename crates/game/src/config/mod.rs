use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BorderConfig {
    pub thickness: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldConfig {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub border: BorderConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PuckConfig {
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub initial_velocity: Vec2,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaddleConfig {
    pub width: f32,
    pub height: f32,
    pub move_size: f32,
}

/// Full parameter set for one game. The core never reads this from anywhere
/// itself; the hosting binary deserializes or constructs it and hands it in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub puck: PuckConfig,
    pub paddle: PaddleConfig,
    #[serde(default)]
    pub clamp_paddles: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig {
                position: Vec2::new(50.0, 50.0),
                width: 300.0,
                height: 400.0,
                border: BorderConfig {
                    thickness: 10.0,
                    color: Color::BLACK,
                },
            },
            puck: PuckConfig {
                width: 10.0,
                height: 10.0,
                color: Color::BLACK,
                initial_velocity: Vec2::new(100.0, 0.0),
            },
            paddle: PaddleConfig {
                width: 120.0,
                height: 5.0,
                move_size: 20.0,
            },
            clamp_paddles: false,
        }
    }
}
