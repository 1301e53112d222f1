use star_ldpc::cli::{self, Run};
use std::error::Error;
use tracing_subscriber::{fmt, EnvFilter};

#[termination::display]
fn main() -> Result<(), Box<dyn Error>> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = std::env::args_os()
        .map(|a| a.into_string().unwrap_or_else(|a| a.to_string_lossy().into_owned()));
    match cli::parse_args(args) {
        Ok(args) => args.run(),
        Err(e) if cli::is_informational(&e) => Ok(e.print()?),
        Err(e) => Err(e.into()),
    }
}
