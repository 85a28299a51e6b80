use std::collections::HashMap;

pub type SessionId = u64;

const MAX_PARTICIPANTS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Created,
    Joined,
    Started,
}

/// One named game as the relay sees it: who is in it and how far its
/// lifecycle has advanced.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: SessionId,
    pub name: String,
    pub participants: Vec<String>,
    pub phase: GamePhase,
}

impl GameSession {
    fn new(id: SessionId, name: &str, host: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            participants: vec![host.to_string()],
            phase: GamePhase::Created,
        }
    }

    pub fn host(&self) -> &str {
        &self.participants[0]
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= MAX_PARTICIPANTS
    }

    pub fn contains(&self, user: &str) -> bool {
        self.participants.iter().any(|p| p == user)
    }
}

/// Owns every live game session, keyed by id and by name. Enforces the
/// lifecycle rules: unique names, at most two participants, one session per
/// client. The rejection strings are exactly what travels back in the
/// `result` field of the response messages.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, GameSession>,
    by_name: HashMap<String, SessionId>,
    by_user: HashMap<String, SessionId>,
    next_id: SessionId,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, user: &str, name: &str) -> Result<SessionId, &'static str> {
        if self.by_name.contains_key(name) {
            return Err("NameTaken");
        }
        if self.by_user.contains_key(user) {
            return Err("AlreadyInGame");
        }

        let id = self.next_id;
        self.next_id += 1;

        self.sessions.insert(id, GameSession::new(id, name, user));
        self.by_name.insert(name.to_string(), id);
        self.by_user.insert(user.to_string(), id);

        Ok(id)
    }

    pub fn join(&mut self, user: &str, name: &str) -> Result<SessionId, &'static str> {
        if self.by_user.contains_key(user) {
            return Err("AlreadyInGame");
        }

        let id = *self.by_name.get(name).ok_or("NoSuchGame")?;
        let session = self.sessions.get_mut(&id).ok_or("NoSuchGame")?;

        if session.is_full() {
            return Err("GameFull");
        }

        session.participants.push(user.to_string());
        session.phase = GamePhase::Joined;
        self.by_user.insert(user.to_string(), id);

        Ok(id)
    }

    /// Marks the named session started and returns it so the caller can fan
    /// the start signal out to its participants.
    pub fn start(&mut self, name: &str) -> Result<&GameSession, &'static str> {
        let id = *self.by_name.get(name).ok_or("NoSuchGame")?;
        let session = self.sessions.get_mut(&id).ok_or("NoSuchGame")?;

        session.phase = GamePhase::Started;
        Ok(session)
    }

    pub fn get(&self, id: SessionId) -> Option<&GameSession> {
        self.sessions.get(&id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&GameSession> {
        self.by_name.get(name).and_then(|id| self.sessions.get(id))
    }

    pub fn session_of(&self, user: &str) -> Option<&GameSession> {
        self.by_user.get(user).and_then(|id| self.sessions.get(id))
    }

    pub fn remove(&mut self, id: SessionId) -> Option<GameSession> {
        let session = self.sessions.remove(&id)?;
        self.by_name.remove(&session.name);
        for participant in &session.participants {
            self.by_user.remove(participant);
        }
        Some(session)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_advances_created_joined_started() {
        let mut registry = SessionRegistry::new();

        let id = registry.create("alice", "first").unwrap();
        assert_eq!(registry.get(id).unwrap().phase, GamePhase::Created);
        assert_eq!(registry.get(id).unwrap().host(), "alice");

        registry.join("bob", "first").unwrap();
        let session = registry.get(id).unwrap();
        assert_eq!(session.phase, GamePhase::Joined);
        assert_eq!(session.participants, vec!["alice", "bob"]);

        let session = registry.start("first").unwrap();
        assert_eq!(session.phase, GamePhase::Started);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = SessionRegistry::new();

        registry.create("alice", "first").unwrap();
        assert_eq!(registry.create("carol", "first"), Err("NameTaken"));
    }

    #[test]
    fn joining_a_missing_or_full_game_is_rejected() {
        let mut registry = SessionRegistry::new();

        assert_eq!(registry.join("bob", "nowhere"), Err("NoSuchGame"));

        registry.create("alice", "first").unwrap();
        registry.join("bob", "first").unwrap();
        assert_eq!(registry.join("carol", "first"), Err("GameFull"));
    }

    #[test]
    fn one_session_per_client() {
        let mut registry = SessionRegistry::new();

        registry.create("alice", "first").unwrap();
        assert_eq!(registry.create("alice", "second"), Err("AlreadyInGame"));
        assert_eq!(registry.join("alice", "first"), Err("AlreadyInGame"));
    }

    #[test]
    fn removal_frees_name_and_participants() {
        let mut registry = SessionRegistry::new();

        let id = registry.create("alice", "first").unwrap();
        registry.join("bob", "first").unwrap();
        registry.remove(id).unwrap();

        assert_eq!(registry.session_count(), 0);
        assert!(registry.session_of("bob").is_none());
        registry.create("alice", "first").unwrap();
    }
}
