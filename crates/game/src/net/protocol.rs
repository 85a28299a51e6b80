use serde::{Deserialize, Serialize};

/// Success value carried by `NewGameResMsg`.
pub const GAME_CREATED: &str = "GameCreated";
/// Success value carried by `JoinGameResMsg`.
pub const JOINED_GAME: &str = "JoinedGame";

const MESSAGE_TYPES: [&str; 7] = [
    "NewGameReqMsg",
    "NewGameResMsg",
    "JoinGameReqMsg",
    "JoinGameResMsg",
    "StartGameReqMsg",
    "StartGameMsg",
    "MoveMsg",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Left,
    Right,
}

impl MoveDirection {
    /// Maps a direction plus an unsigned distance onto a signed x
    /// displacement.
    pub fn signed(self, distance: f32) -> f32 {
        match self {
            MoveDirection::Left => -distance,
            MoveDirection::Right => distance,
        }
    }
}

/// Every message the relay carries, in both directions, keyed by the
/// `messageType` field of the JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "messageType", rename_all_fields = "camelCase")]
pub enum Message {
    NewGameReqMsg {
        user_name: String,
        game_name: String,
    },
    NewGameResMsg {
        result: String,
    },
    JoinGameReqMsg {
        user_name: String,
        game_name: String,
    },
    JoinGameResMsg {
        result: String,
    },
    StartGameReqMsg {
        game_name: String,
    },
    StartGameMsg,
    MoveMsg {
        client_name: String,
        direction: MoveDirection,
        distance: f32,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown message type {0:?}")]
    UnknownType(String),
    #[error("message carries no messageType field")]
    MissingType,
}

impl WireError {
    /// Unknown and untyped messages are skipped rather than treated as
    /// failures, so peers may add message types without breaking us.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, WireError::UnknownType(_) | WireError::MissingType)
    }
}

impl Message {
    pub fn to_json(&self) -> Result<String, WireError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, WireError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let Some(kind) = value.get("messageType").and_then(|v| v.as_str()) else {
            return Err(WireError::MissingType);
        };
        if !MESSAGE_TYPES.contains(&kind) {
            return Err(WireError::UnknownType(kind.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }
}
