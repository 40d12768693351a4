use std::net::{IpAddr, Ipv4Addr};

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "omnigen-web", about = "Run the OmniGen web demo")]
pub struct Cli {
    /// Listen on all interfaces so the demo can be reached from other machines
    #[arg(long)]
    pub share: bool,
}

impl Cli {
    pub fn bind_ip(&self) -> IpAddr {
        match self.share {
            true => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            false => IpAddr::V4(Ipv4Addr::LOCALHOST),
        }
    }
}
