pub mod config;
pub mod geom;
pub mod input;
pub mod net;
pub mod physics;
pub mod session;
pub mod simulation;
pub mod state;

pub use config::{BorderConfig, Color, FieldConfig, GameConfig, PaddleConfig, PuckConfig};
pub use geom::{cross, segments_intersect};
pub use input::{Key, KeyEvent, handle_key};
pub use net::{
    ChannelTransport, GAME_CREATED, JOINED_GAME, Message, MoveDirection, Transport,
    TransportError, WireError,
};
pub use physics::step_puck;
pub use session::{
    GamePhase, GameSession, Session, SessionError, SessionEvent, SessionId, SessionRegistry,
    SessionState,
};
pub use simulation::{FixedTimestep, Simulation, tick};
pub use state::{Field, GameState, Paddle, PaddleSide, Puck};
