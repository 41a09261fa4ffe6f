//! High level CLI-as-a-library for the stylename rewriter.
//!
//! This is directly called to by the `stylename` CLI binary, and by the
//! integration tests.
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use oxc::{
	allocator::Allocator,
	codegen::Codegen,
	diagnostics::{OxcDiagnostic, Severity},
	semantic::SemanticBuilder,
	span::SourceType,
};
use stylename::{HandleMissingStyleName, PluginOptions};

/// Rewrites JSX `styleName` attributes into `className`.
#[derive(Debug, Parser)]
pub struct Args {
	/// Where to output the transformed source. Defaults to
	/// stdout; intermediate folders must exist
	#[arg(short = 'o', long = "output")]
	pub output: Option<String>,
	/// A JSON file holding the plugin options
	#[arg(short = 'c', long = "config")]
	pub config: Option<String>,
	/// Treat warnings as errors
	#[arg(short = 'W')]
	pub warnings_as_errors: bool,
	/// Allow typescript syntax in the input
	#[arg(short = 'T', long = "typescript")]
	pub typescript: bool,
	/// How the runtime helper reacts to an unknown style name
	/// (overrides the config file)
	#[arg(long = "handle-missing-style-name", value_enum)]
	pub handle_missing_style_name: Option<MissingStyleName>,
	/// Let the runtime helper search every imported style module
	/// (overrides the config file)
	#[arg(long = "auto-resolve-multiple-imports")]
	pub auto_resolve_multiple_imports: bool,
	/// The file to transform
	/// (defaults to stdin)
	pub entry_point: Option<String>,
}

/// Command-line spelling of [`HandleMissingStyleName`].
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MissingStyleName {
	/// Throw from the helper.
	Throw,
	/// Warn from the helper.
	Warn,
	/// Silently produce nothing.
	Ignore,
}

impl From<MissingStyleName> for HandleMissingStyleName {
	fn from(value: MissingStyleName) -> Self {
		match value {
			MissingStyleName::Throw => Self::Throw,
			MissingStyleName::Warn => Self::Warn,
			MissingStyleName::Ignore => Self::Ignore,
		}
	}
}

impl Args {
	/// Loads the `--config` file (if any) and applies the flag overrides.
	pub fn plugin_options(&self) -> Result<PluginOptions, Box<dyn std::error::Error>> {
		let mut options = match self.config {
			Some(ref path) => {
				let json = std::fs::read_to_string(path)
					.map_err(|err| format!("failed to read config file `{path}`: {err}"))?;
				PluginOptions::from_json(&json)
					.map_err(|err| format!("invalid config file `{path}`: {err}"))?
			}
			None => PluginOptions::default(),
		};

		if let Some(mode) = self.handle_missing_style_name {
			options.handle_missing_style_name = mode.into();
		}

		if self.auto_resolve_multiple_imports {
			options.auto_resolve_multiple_imports = true;
		}

		Ok(options)
	}
}

/// The `Ok` result type for the [`run`] function.
pub struct Compilation {
	/// The generated code.
	pub code: String,
	/// Any warnings
	pub warnings: Vec<String>,
	/// Any errors; if non-empty, `code` will be empty.
	pub errors: Vec<String>,
}

impl Compilation {
	/// Files `diagnostics` under warnings or errors, returning the
	/// number of errors.
	fn report(
		&mut self,
		diagnostics: Vec<OxcDiagnostic>,
		source: &Arc<String>,
		warnings_as_errors: bool,
	) -> usize {
		let mut errors = 0;

		for mut diagnostic in diagnostics {
			if diagnostic.severity == Severity::Advice {
				tracing::debug!(%diagnostic, "advice");
				continue;
			}

			if warnings_as_errors {
				diagnostic = diagnostic.with_severity(Severity::Error);
			}

			let is_error = diagnostic.severity == Severity::Error;
			let rendered = format!("{:?}", diagnostic.with_source_code(Arc::clone(source)));
			if is_error {
				errors += 1;
				self.errors.push(rendered);
			} else {
				self.warnings.push(rendered);
			}
		}

		errors
	}
}

/// Runs the stylename rewriter with the given arguments.
///
/// This is identical to running the stylename CLI (except for parsing the
/// arguments and reading the input).
///
/// `Err` results indicate fatal errors that prevent the rewrite from
/// completing, such as an unreadable or invalid config file.
/// This does **not** include warnings or syntax errors, which are included in
/// the [`Compilation`] result.
pub fn run(source: String, args: &Args) -> Result<Compilation, Box<dyn std::error::Error>> {
	let options = args.plugin_options()?;

	let mut result = Compilation {
		code: String::new(),
		warnings: Vec::new(),
		errors: Vec::new(),
	};

	let source = Arc::new(source);

	let allocator = Allocator::default();
	let parse_result = oxc::parser::Parser::new(
		&allocator,
		&source,
		if args.typescript {
			SourceType::tsx()
		} else {
			SourceType::jsx()
		},
	)
	.parse();

	if parse_result.panicked && parse_result.errors.is_empty() {
		return Err("parser panicked, but no errors were reported".into());
	}

	if result.report(parse_result.errors, &source, args.warnings_as_errors) > 0 {
		return Ok(result);
	}

	let mut program = parse_result.program;

	let semantic = SemanticBuilder::new()
		.with_check_syntax_error(true)
		.build(&program);

	if result.report(semantic.errors, &source, args.warnings_as_errors) > 0 {
		return Ok(result);
	}

	let scoping = semantic.semantic.into_scoping();
	let transform_result = stylename::transform(&allocator, &mut program, scoping, &options);

	tracing::debug!(
		helper_imported = transform_result.helper_imported,
		diagnostics = transform_result.errors.len(),
		"transform finished"
	);

	if result.report(transform_result.errors, &source, args.warnings_as_errors) > 0 {
		return Ok(result);
	}

	result.code = Codegen::new()
		.with_scoping(Some(transform_result.scoping))
		.build(&program)
		.code;

	Ok(result)
}
