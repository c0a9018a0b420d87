#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cmd;

#[derive(Parser)]
#[command(name = "dataconv", about = "Versioned tag save file tools")]
struct Cli {
	/// Log conversion steps to stderr.
	#[arg(long, short, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print file header and record summary.
	Info(cmd::info::Args),
	/// Print the root compound as SNBT or typed JSON.
	Dump(cmd::dump::Args),
	/// Write a binary tag file from SNBT text.
	Encode(cmd::encode::Args),
	/// Upgrade a stored record to a newer version.
	Convert(cmd::convert::Args),
	/// List registered data types.
	Types(cmd::types::Args),
	/// List the known version ladder.
	Versions(cmd::versions::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> dataconv::upgrade::Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match cli.command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Dump(args) => cmd::dump::run(args),
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Convert(args) => cmd::convert::run(args),
		Commands::Types(args) => cmd::types::run(args),
		Commands::Versions(args) => cmd::versions::run(args),
	}
}

fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
		.init();
}
