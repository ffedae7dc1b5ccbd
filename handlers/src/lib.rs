//! # Handlers for dbot framework
//!
//! Handler implementations for the echo bot: logging, `/start` greeting, and echo.

mod echo;
mod logging;

#[cfg(test)]
mod test;

pub use echo::{EchoHandler, GreetingHandler, GREETING};
pub use logging::LoggingHandler;
