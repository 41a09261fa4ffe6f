#![allow(missing_docs, clippy::missing_docs_in_private_items)]

use clap::Parser;
use stylename_cli::{Args, Compilation};

const HELPER_IMPORT: &str =
	r#"import _getClassName from "babel-plugin-react-css-modules/dist/browser/getClassName";"#;

fn args(extra: &[&str]) -> Args {
	Args::parse_from(std::iter::once("stylename").chain(extra.iter().copied()))
}

fn compile(source: &str, extra: &[&str]) -> Compilation {
	let output = stylename_cli::run(source.to_string(), &args(extra)).expect("run failed");

	eprintln!("--------------- OUTPUT ---------------");
	eprintln!("{}", output.code);
	for warning in &output.warnings {
		eprintln!("warning: {warning}");
	}
	for error in &output.errors {
		eprintln!("error: {error}");
	}

	output
}

fn compile_clean(source: &str, extra: &[&str]) -> String {
	let output = compile(source, extra);
	assert!(output.errors.is_empty(), "rewrite emitted errors");
	assert!(output.warnings.is_empty(), "rewrite emitted warnings");
	output.code
}

/// Writes `json` to a per-test config file and returns its path.
fn config_file(name: &str, json: &serde_json::Value) -> String {
	let path = std::env::temp_dir().join(format!(
		"stylename-{}-{name}.json",
		std::process::id()
	));
	std::fs::write(&path, json.to_string()).expect("failed to write config file");
	path.to_string_lossy().into_owned()
}

#[test]
fn style_name_becomes_a_helper_call() {
	let code = compile_clean(
		"import styles from './a.css';\n<div styleName={styles.foo} />;\n",
		&[],
	);

	assert!(
		code.contains("className={_getClassName(styles.foo, _styleModuleImportMap)}"),
		"{code}"
	);
	assert!(!code.contains("styleName"), "{code}");
	assert!(code.starts_with(HELPER_IMPORT), "{code}");
}

#[test]
fn import_map_follows_the_last_import() {
	let code = compile_clean(
		"import React from 'react';\nimport styles from './a.css';\nimport other from './b.js';\n<div styleName={styles.foo} />;\n",
		&[],
	);

	let map = code
		.find("const _styleModuleImportMap = { styles };")
		.expect("import map missing");
	let last_import = code.find(r#"import other from "./b.js";"#).expect("import missing");
	assert!(map > last_import, "{code}");
	assert!(!code.contains("other }"), "{code}");
}

#[test]
fn namespace_imports_are_style_modules() {
	let code = compile_clean(
		"import * as theme from './theme.css';\n<div styleName={theme.foo} />;\n",
		&[],
	);

	assert!(code.contains("const _styleModuleImportMap = { theme };"), "{code}");
	assert!(
		code.contains("_getClassName(theme.foo, _styleModuleImportMap)"),
		"{code}"
	);
}

#[test]
fn string_class_name_is_prefixed() {
	let code = compile_clean(
		"import styles from './a.css';\n<div className=\"a\" styleName={styles.b} />;\n",
		&[],
	);

	assert!(
		code.contains(r#"className={"a " + _getClassName(styles.b, _styleModuleImportMap)}"#),
		"{code}"
	);
}

#[test]
fn expression_class_name_is_guarded() {
	let code = compile_clean(
		"import styles from './a.css';\n<div className={x} styleName={styles.b} />;\n",
		&[],
	);

	assert!(
		code.contains(r#"(x ? x + " " : "") + _getClassName(styles.b, _styleModuleImportMap)"#),
		"{code}"
	);
	assert_eq!(code.matches("className=").count(), 1, "{code}");
}

#[test]
fn elements_are_untouched_without_style_imports() {
	let code = compile_clean("import React from 'react';\n<div styleName={foo} />;\n", &[]);

	assert!(code.contains("styleName={foo}"), "{code}");
	assert!(!code.contains("_getClassName"), "{code}");
	assert!(!code.contains("_styleModuleImportMap"), "{code}");
}

#[test]
fn helper_is_not_imported_when_every_lookup_resolves() {
	let config = config_file(
		"resolved",
		&serde_json::json!({ "attributeNames": { "className": "className" } }),
	);
	let code = compile_clean(
		"import styles from './a.css';\n<div className={styles.foo} />;\n",
		&["-c", &config],
	);

	assert!(
		code.contains("className={_styleModuleImportMap.styles.foo}"),
		"{code}"
	);
	assert!(!code.contains("_getClassName"), "{code}");
	assert!(code.contains("const _styleModuleImportMap = {"), "{code}");
}

#[test]
fn changed_options_are_passed_to_the_helper() {
	let code = compile_clean(
		"import styles from './a.css';\n<div styleName={styles.foo} />;\n",
		&["--handle-missing-style-name", "warn"],
	);

	assert!(
		code.contains("_getClassName(styles.foo, _styleModuleImportMap, {"),
		"{code}"
	);
	assert!(code.contains(r#"handleMissingStyleName: "warn""#), "{code}");
}

#[test]
fn default_options_are_not_passed_to_the_helper() {
	let code = compile_clean(
		"import styles from './a.css';\n<div styleName={styles.foo} />;\n",
		&["--handle-missing-style-name", "throw"],
	);

	assert!(!code.contains("handleMissingStyleName"), "{code}");
}

#[test]
fn config_file_sets_helper_source_and_filetypes() {
	let config = config_file(
		"helper-source",
		&serde_json::json!({
			"filetypes": [".scss"],
			"helperImportSource": "my-runtime/getClassName",
			"autoResolveMultipleImports": true,
		}),
	);
	let code = compile_clean(
		"import styles from './a.scss';\nimport plain from './b.css';\n<div styleName={styles.foo} />;\n",
		&["--config", &config],
	);

	assert!(
		code.starts_with(r#"import _getClassName from "my-runtime/getClassName";"#),
		"{code}"
	);
	assert!(code.contains("autoResolveMultipleImports: true"), "{code}");
	assert!(code.contains("const _styleModuleImportMap = { styles };"), "{code}");
}

#[test]
fn invalid_config_file_is_fatal() {
	let config = config_file("invalid", &serde_json::json!({ "styleNames": {} }));
	let result = stylename_cli::run(
		"<div />;".to_string(),
		&args(&["--config", &config]),
	);

	assert!(result.is_err());
}

#[test]
fn missing_config_file_is_fatal() {
	let result = stylename_cli::run(
		"<div />;".to_string(),
		&args(&["--config", "/nonexistent/stylename.json"]),
	);

	assert!(result.is_err());
}

#[test]
fn string_style_name_warns_and_is_kept() {
	let output = compile(
		"import styles from './a.css';\n<div styleName=\"foo\" />;\n",
		&[],
	);

	assert!(output.errors.is_empty());
	assert_eq!(output.warnings.len(), 1);
	assert!(output.code.contains(r#"styleName="foo""#), "{}", output.code);
	assert!(!output.code.contains("_getClassName"), "{}", output.code);
}

#[test]
fn warnings_as_errors_discards_output() {
	let output = compile(
		"import styles from './a.css';\n<div styleName=\"foo\" />;\n",
		&["-W"],
	);

	assert_eq!(output.errors.len(), 1);
	assert!(output.warnings.is_empty());
	assert!(output.code.is_empty());
}

#[test]
fn element_class_name_is_an_error() {
	let output = compile(
		"import styles from './a.css';\n<div className=<b /> styleName={styles.foo} />;\n",
		&[],
	);

	assert_eq!(output.errors.len(), 1);
	assert!(output.code.is_empty());
}

#[test]
fn valueless_class_name_is_an_error() {
	let output = compile(
		"import styles from './a.css';\n<div className styleName={styles.a} />;\n",
		&[],
	);

	assert_eq!(output.errors.len(), 1);
	assert!(output.code.is_empty());
}

#[test]
fn class_name_entities_are_decoded() {
	let code = compile_clean(
		"import styles from './a.css';\n<div className=\"a&amp;b\" styleName={styles.c} />;\n",
		&[],
	);

	assert!(
		code.contains(r#"className={"a&b " + _getClassName(styles.c, _styleModuleImportMap)}"#),
		"{code}"
	);
}

#[test]
fn elements_before_the_import_are_rewritten() {
	let code = compile_clean(
		"const A = () => <div styleName={styles.a} />;\nimport styles from './a.css';\n",
		&[],
	);

	assert!(
		code.contains("className={_getClassName(styles.a, _styleModuleImportMap)}"),
		"{code}"
	);
	assert!(!code.contains("styleName"), "{code}");
}

#[test]
fn named_style_imports_warn() {
	let output = compile(
		"import { foo } from './a.css';\n<div styleName={foo} />;\n",
		&[],
	);

	assert!(output.errors.is_empty());
	assert_eq!(output.warnings.len(), 1);
	assert!(output.code.contains("styleName={foo}"), "{}", output.code);
}

#[test]
fn unresolvable_shapes_are_only_advice() {
	let config = config_file(
		"advice",
		&serde_json::json!({ "attributeNames": { "className": "className" } }),
	);
	let code = compile_clean(
		"import styles from './a.css';\n<div className={a || b} />;\n",
		&["-W", "-c", &config],
	);

	assert!(
		code.contains("className={_getClassName(a || b, _styleModuleImportMap)}"),
		"{code}"
	);
}

#[test]
fn typescript_requires_the_flag() {
	const SOURCE: &str =
		"import styles from './a.css';\nconst label: string = 'x';\n<div styleName={styles.foo} />;\n";

	let output = compile(SOURCE, &[]);
	assert!(!output.errors.is_empty());
	assert!(output.code.is_empty());

	let code = compile_clean(SOURCE, &["-T"]);
	assert!(
		code.contains("_getClassName(styles.foo, _styleModuleImportMap)"),
		"{code}"
	);
}
