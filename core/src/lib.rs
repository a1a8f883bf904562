#![no_std]

extern crate alloc;

pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use records::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod cell;
mod difficulty;
mod engine;
mod error;
mod generator;
mod records;
mod session;
mod types;
mod view;
