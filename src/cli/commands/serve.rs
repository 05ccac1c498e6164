//! Serve command
//!
//! Runs the HTTP API server (only built with the `server` feature).

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Run the HTTP API server")]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub bind: String,
}

pub fn execute(args: ServeArgs) -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    actix_web::rt::System::new().block_on(crate::api::server::run(&args.bind))?;
    Ok(())
}
