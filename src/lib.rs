// Knights Escape character core
//
// - `core`: math helpers
// - `engine`: clock, fixed-step game loop, input state
// - `game`: the player character, enemies, items and save data

pub mod core;
pub mod engine;
pub mod game;
