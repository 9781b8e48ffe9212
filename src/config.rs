// settings for the terminal front end, from the command line or environment
use crate::io::IRC_PORT;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(version, about = "A small IRC client")]
pub struct Config {
    /// Server to connect to
    #[arg(short, long, env = "IRC_SERVER", default_value = "127.0.0.1")]
    pub server: String,

    /// Server port
    #[arg(short, long, default_value_t = IRC_PORT)]
    pub port: u16,

    /// Nickname, also used as the user and real name
    #[arg(short, long, env = "IRC_NICK")]
    pub nick: String,

    /// Milliseconds between input processing passes
    #[arg(long, default_value_t = 16)]
    pub tick_ms: u64,

    /// Log and skip malformed or unsupported lines instead of exiting
    #[arg(long)]
    pub lenient: bool,
}

impl Config {
    pub fn tick(&self) -> Duration {
        // a zero period would make tokio's interval panic
        Duration::from_millis(self.tick_ms.max(1))
    }
}
