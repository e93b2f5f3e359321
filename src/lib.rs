//! Simulation core for a top-down dungeon action game: tile world, player
//! and enemy characters, arrows and boss fireballs, collectibles, a
//! scrolling camera and the level lifecycle.
//!
//! The crate does no drawing or audio.  A front end feeds [`entities::TickInput`]
//! into [`compute::GameSession::tick`], reads the resulting
//! [`world::World`] to draw, and reacts to the returned
//! [`entities::GameEvent`]s.

pub mod ai;
pub mod camera;
pub mod character;
pub mod clock;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod items;
pub mod level;
pub mod movement;
pub mod projectile;
pub mod world;
