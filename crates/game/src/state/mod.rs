use glam::Vec2;

use crate::config::{BorderConfig, Color, GameConfig};

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub border: BorderConfig,
}

impl Field {
    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.position.y
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Puck {
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

impl Puck {
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    pub fn left(&self) -> f32 {
        self.position.x - self.half_width()
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.half_width()
    }

    pub fn top(&self) -> f32 {
        self.position.y - self.half_height()
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.half_height()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub move_size: f32,
}

impl Paddle {
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    /// Lower edge of the paddle as a horizontal segment, left to right.
    pub fn bottom_edge(&self) -> (Vec2, Vec2) {
        let y = self.position.y + self.half_height();
        (
            Vec2::new(self.position.x - self.half_width(), y),
            Vec2::new(self.position.x + self.half_width(), y),
        )
    }

    /// Upper edge of the paddle as a horizontal segment, left to right.
    pub fn top_edge(&self) -> (Vec2, Vec2) {
        let y = self.position.y - self.half_height();
        (
            Vec2::new(self.position.x - self.half_width(), y),
            Vec2::new(self.position.x + self.half_width(), y),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleSide {
    Lower,
    Upper,
}

/// All mutable entity state for one running game. One instance per client;
/// remote players only reach it through applied move messages.
#[derive(Debug, Clone)]
pub struct GameState {
    pub field: Field,
    pub puck: Puck,
    pub lower_paddle: Paddle,
    pub upper_paddle: Paddle,
    clamp_paddles: bool,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        let field = Field {
            position: config.field.position,
            width: config.field.width,
            height: config.field.height,
            border: config.field.border,
        };

        let puck = Puck {
            position: field.center(),
            velocity: config.puck.initial_velocity,
            width: config.puck.width,
            height: config.puck.height,
            color: config.puck.color,
        };

        let lower_paddle = Paddle {
            position: Vec2::new(
                field.center().x,
                field.bottom() - config.paddle.height / 2.0,
            ),
            width: config.paddle.width,
            height: config.paddle.height,
            move_size: config.paddle.move_size,
        };

        let upper_paddle = Paddle {
            position: Vec2::new(field.center().x, field.top() + config.paddle.height / 2.0),
            width: config.paddle.width,
            height: config.paddle.height,
            move_size: config.paddle.move_size,
        };

        Self {
            field,
            puck,
            lower_paddle,
            upper_paddle,
            clamp_paddles: config.clamp_paddles,
        }
    }

    pub fn paddle(&self, side: PaddleSide) -> &Paddle {
        match side {
            PaddleSide::Lower => &self.lower_paddle,
            PaddleSide::Upper => &self.upper_paddle,
        }
    }

    /// Adds a signed displacement to a paddle's x position. Paddles may leave
    /// the field unless clamping was enabled in the config.
    pub fn apply_move(&mut self, side: PaddleSide, dx: f32) {
        let field = self.field;
        let clamp = self.clamp_paddles;
        let paddle = match side {
            PaddleSide::Lower => &mut self.lower_paddle,
            PaddleSide::Upper => &mut self.upper_paddle,
        };

        paddle.position.x += dx;
        if clamp {
            let min = field.left() + paddle.half_width();
            let max = field.right() - paddle.half_width();
            paddle.position.x = paddle.position.x.clamp(min, max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn entities_start_centered() {
        let state = GameState::new(&GameConfig::default());

        assert_eq!(state.puck.position, Vec2::new(200.0, 250.0));
        assert_eq!(state.lower_paddle.position, Vec2::new(200.0, 447.5));
        assert_eq!(state.upper_paddle.position, Vec2::new(200.0, 52.5));
    }

    #[test]
    fn moves_are_signed_and_unclamped_by_default() {
        let mut state = GameState::new(&GameConfig::default());
        let start = state.lower_paddle.position.x;

        state.apply_move(PaddleSide::Lower, -20.0);
        state.apply_move(PaddleSide::Lower, -500.0);
        assert_eq!(state.lower_paddle.position.x, start - 520.0);

        state.apply_move(PaddleSide::Upper, 35.0);
        assert_eq!(state.upper_paddle.position.x, start + 35.0);
    }

    #[test]
    fn clamping_keeps_paddles_inside_the_field() {
        let config = GameConfig {
            clamp_paddles: true,
            ..GameConfig::default()
        };
        let mut state = GameState::new(&config);

        state.apply_move(PaddleSide::Lower, -10_000.0);
        assert_eq!(
            state.lower_paddle.position.x,
            state.field.left() + state.lower_paddle.half_width()
        );

        state.apply_move(PaddleSide::Lower, 10_000.0);
        assert_eq!(
            state.lower_paddle.position.x,
            state.field.right() - state.lower_paddle.half_width()
        );
    }

    #[test]
    fn paddle_edges_span_the_paddle_width() {
        let state = GameState::new(&GameConfig::default());
        let (a, b) = state.upper_paddle.bottom_edge();

        assert_eq!(a.y, b.y);
        assert_eq!(b.x - a.x, state.upper_paddle.width);
        assert_eq!(a.y, state.upper_paddle.position.y + 2.5);
    }
}
