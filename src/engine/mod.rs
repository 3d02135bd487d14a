// Engine modules: timing, state machines, input, sprites, scheduling

pub mod entity;
pub mod fsm;
pub mod game_loop;
pub mod input;
pub mod scheduler;
pub mod sprite;
