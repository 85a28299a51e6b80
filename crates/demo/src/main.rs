use std::sync::mpsc::Receiver;

use anyhow::Result;

use volley::{
    ChannelTransport, GAME_CREATED, GameConfig, JOINED_GAME, Key, KeyEvent, Message, Session,
    SessionEvent, SessionRegistry, Simulation, handle_key,
};

/// Two clients and an in-process relay running one full game lifecycle
/// without a network: create, join, start, trade moves, and watch both
/// simulations track the same puck.
struct Player {
    session: Session,
    sim: Simulation,
    transport: ChannelTransport,
    outbox: Receiver<String>,
}

impl Player {
    fn new(user_name: &str) -> Self {
        let (transport, outbox) = ChannelTransport::pair();
        Self {
            session: Session::new(user_name),
            sim: Simulation::new(&GameConfig::default(), 60),
            transport,
            outbox,
        }
    }

    fn pump(&mut self) {
        for event in self.session.pump(&mut self.sim.state) {
            log::info!("{}: {:?}", self.session.user_name(), event);
            if event == SessionEvent::Started {
                self.sim.start();
            }
        }
    }
}

fn route(registry: &mut SessionRegistry, from: &str, raw: &str) -> Vec<(String, String)> {
    let Ok(msg) = Message::from_json(raw) else {
        return Vec::new();
    };
    match msg {
        Message::NewGameReqMsg {
            user_name,
            game_name,
        } => {
            let result = match registry.create(&user_name, &game_name) {
                Ok(_) => GAME_CREATED.to_string(),
                Err(reason) => reason.to_string(),
            };
            match (Message::NewGameResMsg { result }).to_json() {
                Ok(frame) => vec![(user_name, frame)],
                Err(_) => Vec::new(),
            }
        }
        Message::JoinGameReqMsg {
            user_name,
            game_name,
        } => {
            let result = match registry.join(&user_name, &game_name) {
                Ok(_) => JOINED_GAME.to_string(),
                Err(reason) => reason.to_string(),
            };
            match (Message::JoinGameResMsg { result }).to_json() {
                Ok(frame) => vec![(user_name, frame)],
                Err(_) => Vec::new(),
            }
        }
        Message::StartGameReqMsg { game_name } => match registry.start(&game_name) {
            Ok(session) => match Message::StartGameMsg.to_json() {
                Ok(frame) => session
                    .participants
                    .iter()
                    .map(|p| (p.clone(), frame.clone()))
                    .collect(),
                Err(_) => Vec::new(),
            },
            Err(_) => Vec::new(),
        },
        Message::MoveMsg { .. } => match registry.session_of(from) {
            Some(session) => session
                .participants
                .iter()
                .map(|p| (p.clone(), raw.to_string()))
                .collect(),
            None => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn exchange(registry: &mut SessionRegistry, players: &mut [Player; 2]) {
    loop {
        let mut deliveries = Vec::new();
        for player in players.iter() {
            let from = player.session.user_name().to_string();
            while let Ok(frame) = player.outbox.try_recv() {
                deliveries.extend(route(registry, &from, &frame));
            }
        }
        if deliveries.is_empty() {
            break;
        }
        for (recipient, frame) in deliveries {
            for player in players.iter_mut() {
                if player.session.user_name() == recipient {
                    player.session.enqueue(frame.clone());
                }
            }
        }
        for player in players.iter_mut() {
            player.pump();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut registry = SessionRegistry::new();
    let mut players = [Player::new("alice"), Player::new("bob")];

    players[0]
        .session
        .request_new_game(&mut players[0].transport, "exhibition")?;
    exchange(&mut registry, &mut players);

    players[1]
        .session
        .request_join_game(&mut players[1].transport, "exhibition")?;
    exchange(&mut registry, &mut players);

    players[0]
        .session
        .request_start_game(&mut players[0].transport)?;
    exchange(&mut registry, &mut players);

    // Five simulated seconds at 60 Hz, with each player nudging their paddle
    // once a second.
    let dt = 1.0 / 60.0;
    for frame in 0..300u32 {
        if frame % 60 == 0 {
            let Player {
                session,
                sim,
                transport,
                ..
            } = &mut players[0];
            let key = if frame % 120 == 0 {
                Key::ArrowLeft
            } else {
                Key::ArrowRight
            };
            handle_key(KeyEvent::Down(key), &mut sim.state, session, transport)?;
        }
        if frame % 60 == 30 {
            let Player {
                session,
                sim,
                transport,
                ..
            } = &mut players[1];
            handle_key(KeyEvent::Down(Key::ArrowRight), &mut sim.state, session, transport)?;
        }

        exchange(&mut registry, &mut players);
        for player in players.iter_mut() {
            player.sim.update(dt);
        }
    }

    for player in &players {
        let state = &player.sim.state;
        log::info!(
            "{}: puck ({:.1}, {:.1}) velocity ({:.0}, {:.0}) lower paddle x {:.0} upper paddle x {:.0}",
            player.session.user_name(),
            state.puck.position.x,
            state.puck.position.y,
            state.puck.velocity.x,
            state.puck.velocity.y,
            state.lower_paddle.position.x,
            state.upper_paddle.position.x,
        );
    }

    Ok(())
}
