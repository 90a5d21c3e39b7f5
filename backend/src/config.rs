//! Server configuration
//!
//! Every flag can also be set through its environment variable; the binary
//! loads a `.env` file before parsing.

use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "playground", version, about = "Chess session server for bots and humans")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "PLAYGROUND_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: String,

    /// Browser origin allowed by CORS
    #[arg(
        long,
        env = "PLAYGROUND_ALLOWED_ORIGIN",
        default_value = "http://localhost:8081"
    )]
    pub allowed_origin: String,

    /// How often a waiting player re-checks whose turn it is
    #[arg(
        long,
        env = "PLAYGROUND_POLL_INTERVAL_MS",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_ms: u64,

    /// How long a turn wait may last before it gives up
    #[arg(long, env = "PLAYGROUND_TURN_TIMEOUT_SECS", default_value_t = 3600)]
    pub turn_timeout_secs: u64,
}

impl ServerConfig {
    pub fn turn_wait(&self) -> TurnWaitConfig {
        TurnWaitConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_secs(self.turn_timeout_secs),
        }
    }
}

/// Cadence and upper bound of the turn long-poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnWaitConfig {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for TurnWaitConfig {
    fn default() -> Self {
        TurnWaitConfig {
            poll_interval: Duration::from_millis(100),
            timeout: Duration::from_secs(60 * 60),
        }
    }
}
