pub mod client;
pub mod prompt;
pub mod protocol;
pub mod response;

pub use client::GenerationClient;
