use anyhow::Result;
use clap::Parser;
use gridcaptcha::server::{run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "gridcaptcha", about = "Grid CAPTCHA generation server", version)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    addr: std::net::IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    run_server(ServerConfig {
        addr: args.addr,
        port: args.port,
    })
    .await?;
    Ok(())
}
