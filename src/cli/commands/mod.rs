//! Command implementations for the emission zone CLI
//!
//! Each command lives in its own module and shares the fetch/transform
//! pipeline in [`shared`].

pub mod convert;
pub mod list;
pub mod shared;

pub use shared::RunStats;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Dispatch to the selected subcommand
pub async fn run(args: Args) -> Result<RunStats> {
    match args.get_command()? {
        Commands::Convert(convert_args) => convert::run_convert(convert_args).await,
        Commands::List(list_args) => list::run_list(list_args).await,
    }
}
