mod commands;
mod context;

pub use commands::{Artifact, Command, CommandOutput};
pub use context::{ImageHost, StaticHost};
