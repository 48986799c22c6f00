use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Folio: a personal portfolio with a live 3D hero and a spring cursor.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (e.g. debug, folio=trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Skip the 3D scene entirely, as if no graphics were available.
    #[arg(long)]
    pub no_3d: bool,

    /// Force the primary pointer type.
    #[arg(long, value_enum)]
    pub pointer: Option<PointerArg>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PointerArg {
    Fine,
    Coarse,
}

pub fn parse() -> Args {
    Args::parse()
}
