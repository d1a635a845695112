// Engine modules: clock, fixed-step game loop, input state

pub mod clock;
pub mod game_loop;
pub mod input;
