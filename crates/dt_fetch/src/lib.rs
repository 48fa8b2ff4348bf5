pub mod cli;
pub mod client;
pub mod fetch;
pub mod logging;
pub mod materialize;
pub mod pipeline;

#[cfg(test)]
mod test_utils;

pub use client::DevToClient;
pub use fetch::fetch_details;
pub use materialize::Materializer;
pub use pipeline::{Pipeline, SyncReport};

pub use cli::{handle_command, SyncCommands, SyncOptions};
