//! Who's In - roll call bot core for group chats

pub mod bot;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod session;
pub mod store;
pub mod telemetry;

pub use bot::{BotCommand, WhosInBot};
pub use domain::{Command, Response, ResponseKind, RollCall, RollCallResponse, User};
pub use error::BotError;
pub use store::{DataStore, MemoryStore, StoreError};
