//! Chopper Strike: a helicopter defends against spawning dinosaurs while a
//! supply truck keeps the ammunition depot stocked.
//!
//! The library holds everything that is not terminal I/O so the game can be
//! driven headlessly from tests.

pub mod compute;
pub mod depot;
pub mod difficulty;
pub mod entities;
pub mod game;
pub mod input;
pub mod platform;
pub mod spawner;
pub mod state;
