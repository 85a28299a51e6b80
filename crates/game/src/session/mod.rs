mod registry;

use std::collections::VecDeque;

use crate::net::{
    GAME_CREATED, JOINED_GAME, Message, MoveDirection, Transport, TransportError, WireError,
};
use crate::state::{GameState, PaddleSide};

pub use registry::{GamePhase, GameSession, SessionId, SessionRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingCreateOrJoin,
    Created,
    Joined,
    Started,
}

/// Outcomes of pumping the inbox that the hosting loop must surface or act
/// on: entering the game view, a rejection reason, the start signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    GameCreated,
    GameJoined,
    CreateFailed { reason: String },
    JoinFailed { reason: String },
    Started,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Wire(#[from] WireError),
    #[error("request not valid in the {0:?} state")]
    BadState(SessionState),
}

/// Client-side protocol state machine. Outbound requests go straight to the
/// transport; inbound frames are queued with [`Session::enqueue`] and drained
/// once per loop iteration by [`Session::pump`], so transitions happen at a
/// single well-defined point.
#[derive(Debug)]
pub struct Session {
    user_name: String,
    game_name: Option<String>,
    state: SessionState,
    inbox: VecDeque<String>,
}

impl Session {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            game_name: None,
            state: SessionState::Idle,
            inbox: VecDeque::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn game_name(&self) -> Option<&str> {
        self.game_name.as_deref()
    }

    /// Asks the relay to create a game. The state only advances once the send
    /// succeeded; a dead transport aborts the request with nothing changed.
    pub fn request_new_game(
        &mut self,
        transport: &mut dyn Transport,
        game_name: &str,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::BadState(self.state));
        }
        self.send(
            transport,
            &Message::NewGameReqMsg {
                user_name: self.user_name.clone(),
                game_name: game_name.to_string(),
            },
        )?;
        self.game_name = Some(game_name.to_string());
        self.state = SessionState::AwaitingCreateOrJoin;
        Ok(())
    }

    pub fn request_join_game(
        &mut self,
        transport: &mut dyn Transport,
        game_name: &str,
    ) -> Result<(), SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::BadState(self.state));
        }
        self.send(
            transport,
            &Message::JoinGameReqMsg {
                user_name: self.user_name.clone(),
                game_name: game_name.to_string(),
            },
        )?;
        self.game_name = Some(game_name.to_string());
        self.state = SessionState::AwaitingCreateOrJoin;
        Ok(())
    }

    pub fn request_start_game(&mut self, transport: &mut dyn Transport) -> Result<(), SessionError> {
        let game_name = match (self.state, &self.game_name) {
            (SessionState::Created | SessionState::Joined, Some(name)) => name.clone(),
            _ => return Err(SessionError::BadState(self.state)),
        };
        self.send(transport, &Message::StartGameReqMsg { game_name })
    }

    /// Broadcasts one local paddle move. The caller has already applied it
    /// locally; nothing is rolled back if the send fails.
    pub fn send_move(
        &mut self,
        transport: &mut dyn Transport,
        direction: MoveDirection,
        distance: f32,
    ) -> Result<(), SessionError> {
        self.send(
            transport,
            &Message::MoveMsg {
                client_name: self.user_name.clone(),
                direction,
                distance,
            },
        )
    }

    /// Queues a raw inbound frame for the next pump.
    pub fn enqueue(&mut self, raw: impl Into<String>) {
        self.inbox.push_back(raw.into());
    }

    /// Drains the inbox, applying each message to the state machine and the
    /// entity state. A malformed frame aborts only itself; the rest of the
    /// queue still runs.
    pub fn pump(&mut self, state: &mut GameState) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(raw) = self.inbox.pop_front() {
            match self.handle_raw(&raw, state) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(err) => log::warn!("dropping message: {err}"),
            }
        }
        events
    }

    /// Applies a single raw frame. Unknown message types are logged and
    /// ignored; malformed payloads error out before any state is touched.
    pub fn handle_raw(
        &mut self,
        raw: &str,
        state: &mut GameState,
    ) -> Result<Option<SessionEvent>, SessionError> {
        let msg = match Message::from_json(raw) {
            Ok(msg) => msg,
            Err(err) if err.is_ignorable() => {
                log::debug!("ignoring message: {raw}");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        Ok(self.handle_message(msg, state))
    }

    fn handle_message(&mut self, msg: Message, state: &mut GameState) -> Option<SessionEvent> {
        match (self.state, msg) {
            (SessionState::AwaitingCreateOrJoin, Message::NewGameResMsg { result }) => {
                if result == GAME_CREATED {
                    self.state = SessionState::Created;
                    Some(SessionEvent::GameCreated)
                } else {
                    self.state = SessionState::Idle;
                    self.game_name = None;
                    Some(SessionEvent::CreateFailed { reason: result })
                }
            }
            (SessionState::AwaitingCreateOrJoin, Message::JoinGameResMsg { result }) => {
                if result == JOINED_GAME {
                    self.state = SessionState::Joined;
                    Some(SessionEvent::GameJoined)
                } else {
                    self.state = SessionState::Idle;
                    self.game_name = None;
                    Some(SessionEvent::JoinFailed { reason: result })
                }
            }
            (SessionState::Created | SessionState::Joined, Message::StartGameMsg) => {
                self.state = SessionState::Started;
                Some(SessionEvent::Started)
            }
            (
                SessionState::Started,
                Message::MoveMsg {
                    client_name,
                    direction,
                    distance,
                },
            ) => {
                // Our own echo comes back too; only the remote player's moves
                // drive the upper paddle.
                if client_name != self.user_name {
                    state.apply_move(PaddleSide::Upper, direction.signed(distance));
                }
                None
            }
            (current, msg) => {
                log::debug!("ignoring {msg:?} in state {current:?}");
                None
            }
        }
    }

    /// Tears the session back down to `Idle` so a new game can be created or
    /// joined. There is no transition out of `Started` short of this.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.game_name = None;
        self.inbox.clear();
    }

    fn send(&mut self, transport: &mut dyn Transport, msg: &Message) -> Result<(), SessionError> {
        let frame = msg.to_json()?;
        transport.send(&frame)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::net::ChannelTransport;

    fn fixture() -> (Session, GameState, ChannelTransport, std::sync::mpsc::Receiver<String>) {
        let (transport, rx) = ChannelTransport::pair();
        (
            Session::new("alice"),
            GameState::new(&GameConfig::default()),
            transport,
            rx,
        )
    }

    fn created_session() -> (Session, GameState, ChannelTransport, std::sync::mpsc::Receiver<String>)
    {
        let (mut session, mut state, mut transport, rx) = fixture();
        session.request_new_game(&mut transport, "first").unwrap();
        session.enqueue(r#"{"messageType":"NewGameResMsg","result":"GameCreated"}"#);
        session.pump(&mut state);
        (session, state, transport, rx)
    }

    #[test]
    fn create_flow_reaches_created() {
        let (mut session, mut state, mut transport, rx) = fixture();

        session.request_new_game(&mut transport, "first").unwrap();
        assert_eq!(session.state(), SessionState::AwaitingCreateOrJoin);
        assert_eq!(
            rx.try_recv().unwrap(),
            r#"{"messageType":"NewGameReqMsg","userName":"alice","gameName":"first"}"#
        );

        session.enqueue(r#"{"messageType":"NewGameResMsg","result":"GameCreated"}"#);
        let events = session.pump(&mut state);
        assert_eq!(events, vec![SessionEvent::GameCreated]);
        assert_eq!(session.state(), SessionState::Created);
    }

    #[test]
    fn rejected_create_returns_to_idle_with_the_reason() {
        let (mut session, mut state, mut transport, _rx) = fixture();

        session.request_new_game(&mut transport, "first").unwrap();
        session.enqueue(r#"{"messageType":"NewGameResMsg","result":"NameTaken"}"#);

        let events = session.pump(&mut state);
        assert_eq!(
            events,
            vec![SessionEvent::CreateFailed {
                reason: "NameTaken".to_string()
            }]
        );
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.game_name(), None);
    }

    #[test]
    fn join_flow_reaches_joined_then_started() {
        let (mut session, mut state, mut transport, _rx) = fixture();

        session.request_join_game(&mut transport, "first").unwrap();
        session.enqueue(r#"{"messageType":"JoinGameResMsg","result":"JoinedGame"}"#);
        session.enqueue(r#"{"messageType":"StartGameMsg"}"#);

        let events = session.pump(&mut state);
        assert_eq!(
            events,
            vec![SessionEvent::GameJoined, SessionEvent::Started]
        );
        assert_eq!(session.state(), SessionState::Started);
    }

    #[test]
    fn requests_are_gated_on_state() {
        let (mut session, _state, mut transport, _rx) = fixture();

        assert!(matches!(
            session.request_start_game(&mut transport),
            Err(SessionError::BadState(SessionState::Idle))
        ));

        session.request_new_game(&mut transport, "first").unwrap();
        assert!(matches!(
            session.request_join_game(&mut transport, "other"),
            Err(SessionError::BadState(SessionState::AwaitingCreateOrJoin))
        ));
    }

    #[test]
    fn closed_transport_aborts_the_request_without_a_transition() {
        let (mut session, _state, mut transport, rx) = fixture();
        drop(rx);

        let err = session.request_new_game(&mut transport, "first");
        assert!(matches!(
            err,
            Err(SessionError::Transport(TransportError::NotOpen))
        ));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.game_name(), None);
    }

    #[test]
    fn remote_move_displaces_the_upper_paddle() {
        let (mut session, mut state, _transport, _rx) = created_session();
        session.enqueue(r#"{"messageType":"StartGameMsg"}"#);
        session.pump(&mut state);

        let before = state.upper_paddle.position.x;
        session.enqueue(
            r#"{"messageType":"MoveMsg","clientName":"bob","direction":"Left","distance":20}"#,
        );
        session.pump(&mut state);

        assert_eq!(state.upper_paddle.position.x, before - 20.0);
    }

    #[test]
    fn own_echo_is_not_applied() {
        let (mut session, mut state, _transport, _rx) = created_session();
        session.enqueue(r#"{"messageType":"StartGameMsg"}"#);
        session.pump(&mut state);

        let before = state.upper_paddle.position.x;
        session.enqueue(
            r#"{"messageType":"MoveMsg","clientName":"alice","direction":"Left","distance":20}"#,
        );
        session.pump(&mut state);

        assert_eq!(state.upper_paddle.position.x, before);
    }

    #[test]
    fn moves_before_start_are_ignored() {
        let (mut session, mut state, _transport, _rx) = created_session();

        let before = state.upper_paddle.position.x;
        session.enqueue(
            r#"{"messageType":"MoveMsg","clientName":"bob","direction":"Left","distance":20}"#,
        );
        session.pump(&mut state);

        assert_eq!(state.upper_paddle.position.x, before);
        assert_eq!(session.state(), SessionState::Created);
    }

    #[test]
    fn unknown_message_types_are_ignored() {
        let (mut session, mut state, _transport, _rx) = created_session();

        session.enqueue(r#"{"messageType":"ScoreMsg","points":3}"#);
        session.enqueue(r#"{"direction":"Left"}"#);
        let events = session.pump(&mut state);

        assert!(events.is_empty());
        assert_eq!(session.state(), SessionState::Created);
    }

    #[test]
    fn malformed_frame_is_dropped_without_stalling_the_queue() {
        let (mut session, mut state, _transport, _rx) = created_session();

        session.enqueue("{broken");
        session.enqueue(r#"{"messageType":"StartGameMsg"}"#);
        let events = session.pump(&mut state);

        assert_eq!(events, vec![SessionEvent::Started]);
        assert_eq!(session.state(), SessionState::Started);
    }

    #[test]
    fn reset_returns_to_idle() {
        let (mut session, mut state, _transport, _rx) = created_session();
        session.enqueue(r#"{"messageType":"StartGameMsg"}"#);
        session.pump(&mut state);
        assert_eq!(session.state(), SessionState::Started);

        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.game_name(), None);
    }

    #[test]
    fn outgoing_move_carries_the_local_identity() {
        let (mut session, _state, mut transport, rx) = created_session();
        // Drain the create request frame.
        let _ = rx.try_recv();

        session
            .send_move(&mut transport, MoveDirection::Right, 20.0)
            .unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            r#"{"messageType":"MoveMsg","clientName":"alice","direction":"Right","distance":20.0}"#
        );
    }
}
