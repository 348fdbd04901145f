pub mod models;
pub mod poll;
pub mod registry;
pub mod server;
pub mod state;
pub mod upstream;
pub mod utils;
pub mod websocket;

pub use server::Server;
