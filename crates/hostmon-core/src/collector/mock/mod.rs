//! In-memory `/proc` fixtures for exercising metric sources without Linux.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
