use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DB_FILE: &str = "postbacks.db";

#[derive(Parser)]
#[command(name = "pb", about = "Capture and inspect webhook postbacks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the capture server
    Serve(ServeArgs),
    /// Print the OpenAPI document
    Openapi,
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "POSTBACK_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,
    #[arg(long, env = "POSTBACK_PORT", default_value_t = 8081)]
    pub port: u16,
    /// Directory holding the postbacks database; created if missing.
    #[arg(long, env = "POSTBACK_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }
}
