use clap::Parser;
use emission_zones::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => eprintln!("\nReceived CTRL+C, shutting down..."),
                    Err(e) => eprintln!("\nFailed to listen for CTRL+C: {}", e),
                }
                Err(emission_zones::Error::processing_interrupted(
                    "Processing interrupted by user",
                ))
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Emission Zones - UVAR Feed Converter");
    println!("====================================");
    println!();
    println!("Convert Dutch urban vehicle access regulation (UVAR) XML feeds into");
    println!("map-ready emission zone records with normalized polygon geometry.");
    println!();
    println!("USAGE:");
    println!("    emission-zones <COMMAND> [OPTIONS] [INPUT]...");
    println!();
    println!("COMMANDS:");
    println!("    convert     Convert feed documents into a JSON array of zones");
    println!("    list        List zones with filters and summary counts");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("INPUTS:");
    println!("    Files, directories (searched for *.xml), glob patterns or http(s) URLs.");
    println!("    Without inputs the feed in the user data directory is used.");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert a downloaded feed to pretty JSON:");
    println!("    emission-zones convert feed.xml -o zones.json --pretty");
    println!();
    println!("    # Fetch the feed and list upcoming zero-emission zones:");
    println!("    emission-zones list https://example.org/uvar.xml --type ze --status upcoming");
    println!();
    println!("    # Decode restrictions from vehicle characteristics:");
    println!("    emission-zones convert feed.xml --labels decoded");
    println!();
    println!("For detailed help on any command, use:");
    println!("    emission-zones <COMMAND> --help");
}
