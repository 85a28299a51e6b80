mod net;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal;

use net::TcpTransport;
use volley::{GameConfig, Key, KeyEvent, Session, SessionEvent, Simulation, handle_key};

#[derive(Parser)]
#[command(name = "volley")]
#[command(about = "Volley game client")]
struct Args {
    #[arg(
        short,
        long,
        default_value = "127.0.0.1:9160",
        help = "Relay address to connect to"
    )]
    server: String,

    #[arg(short, long, help = "Player name, sent with every move")]
    user: String,

    #[arg(short, long, help = "Game name to create or join")]
    game: String,

    #[arg(long, help = "Join an existing game instead of creating one")]
    join: bool,

    #[arg(long, help = "JSON game config file; built-in defaults otherwise")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 60)]
    tick_rate: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let mut transport = TcpTransport::connect(&args.server)
        .with_context(|| format!("connecting to {}", args.server))?;
    log::info!("Connected to {}", args.server);

    let mut session = Session::new(args.user);
    let mut sim = Simulation::new(&config, args.tick_rate);

    if args.join {
        session.request_join_game(&mut transport, &args.game)?;
    } else {
        session.request_new_game(&mut transport, &args.game)?;
    }

    terminal::enable_raw_mode()?;
    let result = run(&mut session, &mut sim, &mut transport);
    terminal::disable_raw_mode()?;
    result
}

fn load_config(path: Option<&std::path::Path>) -> Result<GameConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(GameConfig::default()),
    }
}

fn run(session: &mut Session, sim: &mut Simulation, transport: &mut TcpTransport) -> Result<()> {
    let mut last = Instant::now();
    let mut last_report = Instant::now();

    loop {
        for frame in transport.poll_frames()? {
            session.enqueue(frame);
        }
        if !transport.is_open() {
            bail!("connection to the relay was lost");
        }

        for event in session.pump(&mut sim.state) {
            match event {
                SessionEvent::GameCreated => log::info!("Game created; press s to start"),
                SessionEvent::GameJoined => log::info!("Joined game; waiting for start"),
                SessionEvent::CreateFailed { reason } => bail!("create rejected: {reason}"),
                SessionEvent::JoinFailed { reason } => bail!("join rejected: {reason}"),
                SessionEvent::Started => {
                    log::info!("Game on");
                    sim.start();
                }
            }
        }

        if event::poll(Duration::from_millis(1))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('s') => {
                            if let Err(err) = session.request_start_game(transport) {
                                log::warn!("cannot start: {err}");
                            }
                        }
                        code => {
                            if let Some(key) = map_key(code) {
                                handle_key(KeyEvent::Down(key), &mut sim.state, session, transport)?;
                            }
                        }
                    }
                }
            }
        }

        let now = Instant::now();
        sim.update(now.duration_since(last).as_secs_f32());
        last = now;

        if sim.is_started() && now.duration_since(last_report) >= Duration::from_secs(1) {
            let puck = &sim.state.puck;
            log::debug!("puck at ({:.1}, {:.1})", puck.position.x, puck.position.y);
            last_report = now;
        }
    }

    Ok(())
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::ArrowLeft),
        KeyCode::Right => Some(Key::ArrowRight),
        KeyCode::Char('a') => Some(Key::KeyA),
        KeyCode::Char('d') => Some(Key::KeyD),
        _ => None,
    }
}
