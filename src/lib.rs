//! Traislate - Audio Translation Gateway
//!
//! Accepts a recorded audio file, transcribes it and translates the transcript
//! through an upstream speech-and-language service, and returns a normalized
//! result. The client side falls back to a demo result when the gateway is
//! unreachable.

pub mod cli;
pub mod client;
pub mod config;
pub mod env;
pub mod error;
pub mod gateway;
pub mod model;
pub mod server;
pub mod transcribe;
pub mod translate;
