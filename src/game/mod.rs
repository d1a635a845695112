// Gameplay: the player character, enemies, items, platforms and save data

pub mod characters;
pub mod enemy;
pub mod entity;
pub mod items;
pub mod platform;
pub mod save;
