use crate::net::{MoveDirection, Transport};
use crate::session::{Session, SessionError};
use crate::state::{GameState, PaddleSide};

/// Keys the game reacts to. The arrow keys drive the networked lower paddle;
/// A and D drive the upper paddle locally so two players can share one
/// keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    KeyA,
    KeyD,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(Key),
    Up(Key),
}

/// Applies one keyboard event: the paddle moves locally right away, and lower
/// paddle moves are additionally broadcast as a move message. Key releases do
/// nothing.
pub fn handle_key(
    event: KeyEvent,
    state: &mut GameState,
    session: &mut Session,
    transport: &mut dyn Transport,
) -> Result<(), SessionError> {
    let KeyEvent::Down(key) = event else {
        return Ok(());
    };

    match key {
        Key::ArrowLeft => {
            let distance = state.lower_paddle.move_size;
            state.apply_move(PaddleSide::Lower, -distance);
            session.send_move(transport, MoveDirection::Left, distance)
        }
        Key::ArrowRight => {
            let distance = state.lower_paddle.move_size;
            state.apply_move(PaddleSide::Lower, distance);
            session.send_move(transport, MoveDirection::Right, distance)
        }
        Key::KeyA => {
            let distance = state.upper_paddle.move_size;
            state.apply_move(PaddleSide::Upper, -distance);
            Ok(())
        }
        Key::KeyD => {
            let distance = state.upper_paddle.move_size;
            state.apply_move(PaddleSide::Upper, distance);
            Ok(())
        }
    }
}
