mod puck;

pub use puck::step_puck;
