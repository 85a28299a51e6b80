use crate::config::GameConfig;
use crate::physics::step_puck;
use crate::state::GameState;

/// One pure simulation step: advance the puck by `dt` seconds against the
/// current field and paddle snapshots. Callable from anywhere; rendering and
/// networking never enter into it.
pub fn tick(state: &mut GameState, dt: f32) {
    let field = state.field;
    let upper = state.upper_paddle;
    let lower = state.lower_paddle;
    step_puck(&mut state.puck, &field, &upper, &lower, dt);
}

pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            dt: 1.0 / tick_rate as f32,
            accumulator: 0.0,
        }
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn accumulate(&mut self, delta: f32) {
        self.accumulator += delta.min(0.25);
    }

    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator >= self.dt {
            self.accumulator -= self.dt;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Drives fixed-rate ticks over one game's state. Does nothing until the
/// session start signal flips the started flag; there is no way to stop a
/// started simulation short of dropping it.
pub struct Simulation {
    pub state: GameState,
    timestep: FixedTimestep,
    started: bool,
}

impl Simulation {
    pub fn new(config: &GameConfig, tick_rate: u32) -> Self {
        Self {
            state: GameState::new(config),
            timestep: FixedTimestep::new(tick_rate),
            started: false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn start(&mut self) {
        self.started = true;
        self.timestep.reset();
    }

    /// Feeds elapsed wall time in and runs however many fixed ticks it
    /// covers. Returns the number of ticks run.
    pub fn update(&mut self, delta: f32) -> u32 {
        if !self.started {
            return 0;
        }

        self.timestep.accumulate(delta);

        let mut ticks_run = 0;
        while self.timestep.consume_tick() {
            tick(&mut self.state, self.timestep.dt());
            ticks_run += 1;
        }

        ticks_run
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn fixed_timestep_accumulation() {
        let mut ts = FixedTimestep::new(60);

        ts.accumulate(1.0 / 30.0);
        assert!(ts.consume_tick());
        assert!(ts.consume_tick());
        assert!(!ts.consume_tick());
    }

    #[test]
    fn large_deltas_are_clamped() {
        let mut ts = FixedTimestep::new(4);

        // A ten second stall feeds in at most 0.25s, one tick at this rate.
        ts.accumulate(10.0);
        assert!(ts.consume_tick());
        assert!(!ts.consume_tick());
    }

    #[test]
    fn simulation_waits_for_the_start_signal() {
        let mut sim = Simulation::new(&GameConfig::default(), 60);
        let before = sim.state.puck.position;

        assert_eq!(sim.update(1.0 / 30.0), 0);
        assert_eq!(sim.state.puck.position, before);

        sim.start();
        assert_eq!(sim.update(1.0 / 30.0), 2);
        assert_ne!(sim.state.puck.position, before);
    }

    #[test]
    fn ticks_advance_the_puck_by_velocity() {
        let mut sim = Simulation::new(&GameConfig::default(), 100);
        sim.state.puck.velocity = Vec2::new(50.0, 0.0);
        sim.start();

        sim.update(0.01);

        assert!((sim.state.puck.position.x - 200.5).abs() < 1e-3);
    }
}
