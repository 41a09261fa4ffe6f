//! CLI for the stylename JSX rewriter.
use std::io::{Read, Write};

use clap::Parser;
use stylename_cli::Args;
use tracing_subscriber::EnvFilter;

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let args = Args::parse();

	if let Err(err) = try_main(&args) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

/// Reads the input, rewrites it and writes the result.
fn try_main(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
	let source = if let Some(ref entry) = args.entry_point {
		std::fs::read_to_string(entry)
			.map_err(|err| format!("failed to read entry point `{entry}`: {err}"))?
	} else {
		let mut str = String::with_capacity(4096);
		std::io::stdin()
			.read_to_string(&mut str)
			.map_err(|err| format!("failed to read stdin: {err}"))?;
		str
	};

	let result = stylename_cli::run(source, args)?;

	for warning in &result.warnings {
		eprintln!("{warning}");
	}

	for error in &result.errors {
		eprintln!("{error}");
	}

	if !result.errors.is_empty() {
		eprintln!("\nexiting due to {} errors", result.errors.len());
		std::process::exit(1);
	}

	if let Some(ref output) = args.output {
		let mut fd = std::fs::File::create(output)
			.map_err(|err| format!("failed to create output file `{output}`: {err}"))?;
		fd.write_all(result.code.as_bytes())?;
	} else {
		std::io::stdout().write_all(result.code.as_bytes())?;
	}

	Ok(())
}
