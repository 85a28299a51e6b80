mod protocol;
mod transport;

pub use protocol::{GAME_CREATED, JOINED_GAME, Message, MoveDirection, WireError};
pub use transport::{ChannelTransport, Transport, TransportError};
