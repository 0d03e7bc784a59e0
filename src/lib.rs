#[macro_use]
extern crate lazy_static;

pub mod client;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod fold;
pub mod game;
pub mod metrics;
pub mod player;
pub mod round;
pub mod routes;
pub mod session;
pub mod session_factory;
pub mod startup;
pub mod storage;
pub mod websocket;
