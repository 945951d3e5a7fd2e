/// IES profile to light cookie baker main entry point
mod args;
mod converter;
mod dds_writer;
mod manifest;
mod png_writer;

use args::BakeArgs;
use clap::Parser;
use converter::IesConverter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = BakeArgs::parse();

    let converter = IesConverter::new(&args)?;
    converter.convert()?;

    Ok(())
}
