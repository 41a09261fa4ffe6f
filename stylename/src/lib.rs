//! # stylename
//! This is the core library for the stylename JSX rewriter.
//!
//! It merges `styleName={...}` attributes into `className`, resolving
//! statically known style module lookups at compile time and deferring
//! everything else to a runtime `getClassName` helper.

pub mod constants;
pub mod error;
pub mod merge;
pub mod nodes;
pub mod object_expression;
pub mod options;
pub mod rewrite;
mod traverser;

use std::cell::Cell;

use oxc::{
	allocator::{Allocator, Box, FromIn, Vec},
	ast::ast::{
		BindingIdentifier, BindingPattern, BindingPatternKind, Expression, IdentifierName,
		IdentifierReference, ImportDeclaration, ImportDeclarationSpecifier,
		ImportDefaultSpecifier, ImportOrExportKind, ObjectExpression, ObjectProperty,
		ObjectPropertyKind, Program, PropertyKey, PropertyKind, Statement, StringLiteral,
		VariableDeclaration, VariableDeclarationKind, VariableDeclarator,
	},
	diagnostics::OxcDiagnostic,
	semantic::{NodeId, Reference, ReferenceFlags, ReferenceId, Scoping, SymbolFlags, SymbolId},
	span::{Atom, Span},
};

pub use crate::{
	error::RewriteError,
	options::{GetClassNameOptions, HandleMissingStyleName, PluginOptions},
	rewrite::AttributeRewriter,
};
use crate::{
	constants::{HELPER, HELPER_IDENT, IMPORT_MAP, IMPORT_MAP_IDENT},
	traverser::{StyleModule, StyleNameTraverser},
};

/// Return value from [`transform()`].
///
/// Be sure to check [`StyleNameTransformResult::errors`]
/// to see if anything failed during transformation.
pub struct StyleNameTransformResult {
	/// The [`Scoping`] instance after transformation.
	pub scoping: Scoping,
	/// Any diagnostics that were emitted during transformation.
	///
	/// Error-severity entries mean the element they point at was
	/// left as it was in the source.
	pub errors: std::vec::Vec<OxcDiagnostic>,
	/// Whether the runtime helper import was injected.
	pub helper_imported: bool,
}

/// Rewrites styleName attributes in [`Program`], in-place.
pub fn transform<'a>(
	allocator: &'a Allocator,
	program: &mut Program<'a>,
	mut scoping: Scoping,
	options: &PluginOptions,
) -> StyleNameTransformResult {
	// Neither identifier is registered with the root scope until it is
	// known to be emitted.
	let helper_ref =
		scoping.create_reference(Reference::new(NodeId::DUMMY, ReferenceFlags::read()));
	let import_map_ref =
		scoping.create_reference(Reference::new(NodeId::DUMMY, ReferenceFlags::read()));

	let mut traverser = StyleNameTraverser::new_in(
		options.clone(),
		IdentifierReference {
			span: Span::default(),
			name: HELPER,
			reference_id: Cell::new(Some(helper_ref)),
		},
		IdentifierReference {
			span: Span::default(),
			name: IMPORT_MAP,
			reference_id: Cell::new(Some(import_map_ref)),
		},
		allocator,
	);
	let mut scoping = oxc_traverse::traverse_mut(&mut traverser, allocator, program, scoping);

	if !traverser.style_modules.is_empty() {
		let map_sym = scoping.create_symbol(
			Span::default(),
			IMPORT_MAP_IDENT,
			SymbolFlags::ConstVariable,
			scoping.root_scope_id(),
			NodeId::DUMMY,
		);
		if traverser.import_map_used {
			bind_reference(&mut scoping, map_sym, import_map_ref);
		}

		let position = program
			.body
			.iter()
			.rposition(|stmt| matches!(stmt, Statement::ImportDeclaration(_)))
			.map_or(0, |index| index + 1);

		program.body.insert(
			position,
			import_map_declaration(allocator, &traverser.style_modules, map_sym),
		);
	}

	if traverser.helper_used {
		let helper_sym = scoping.create_symbol(
			Span::default(),
			HELPER_IDENT,
			SymbolFlags::Import,
			scoping.root_scope_id(),
			NodeId::DUMMY,
		);
		bind_reference(&mut scoping, helper_sym, helper_ref);

		program.body.insert(
			0,
			Statement::ImportDeclaration(Box::new_in(
				ImportDeclaration {
					import_kind: ImportOrExportKind::Value,
					phase: None,
					span: Span::empty(0),
					specifiers: Some(Vec::from_array_in(
						[ImportDeclarationSpecifier::ImportDefaultSpecifier(
							Box::new_in(
								ImportDefaultSpecifier {
									span: Span::empty(0),
									local: BindingIdentifier {
										span: Span::empty(0),
										name: HELPER,
										symbol_id: Cell::new(Some(helper_sym)),
									},
								},
								allocator,
							),
						)],
						allocator,
					)),
					source: StringLiteral {
						lossy: false,
						raw: None,
						value: Atom::from_in(options.helper_import_source.as_str(), allocator),
						span: Span::empty(0),
					},
					with_clause: None,
				},
				allocator,
			)),
		);
	}

	StyleNameTransformResult {
		scoping,
		errors: traverser.errors,
		helper_imported: traverser.helper_used,
	}
}

/// Resolves `reference_id` to `symbol_id`.
fn bind_reference(scoping: &mut Scoping, symbol_id: SymbolId, reference_id: ReferenceId) {
	scoping.get_reference_mut(reference_id).set_symbol_id(symbol_id);
	scoping.add_resolved_reference(symbol_id, reference_id);
}

/// Builds `const _styleModuleImportMap = { styles, ... };`.
fn import_map_declaration<'a>(
	allocator: &'a Allocator,
	modules: &[StyleModule<'a>],
	symbol_id: SymbolId,
) -> Statement<'a> {
	let properties = Vec::from_iter_in(
		modules.iter().map(|module| {
			ObjectPropertyKind::ObjectProperty(Box::new_in(
				ObjectProperty {
					span: module.span,
					kind: PropertyKind::Init,
					key: PropertyKey::StaticIdentifier(Box::new_in(
						IdentifierName {
							span: module.span,
							name: module.name,
						},
						allocator,
					)),
					value: Expression::Identifier(Box::new_in(
						IdentifierReference {
							span: module.span,
							name: module.name,
							reference_id: Cell::new(module.reference_id),
						},
						allocator,
					)),
					method: false,
					shorthand: true,
					computed: false,
				},
				allocator,
			))
		}),
		allocator,
	);

	Statement::VariableDeclaration(Box::new_in(
		VariableDeclaration {
			span: Span::default(),
			kind: VariableDeclarationKind::Const,
			declare: false,
			declarations: Vec::from_array_in(
				[VariableDeclarator {
					definite: false,
					span: Span::default(),
					kind: VariableDeclarationKind::Const,
					id: BindingPattern {
						kind: BindingPatternKind::BindingIdentifier(Box::new_in(
							BindingIdentifier {
								span: Span::default(),
								name: IMPORT_MAP,
								symbol_id: Cell::new(Some(symbol_id)),
							},
							allocator,
						)),
						type_annotation: None,
						optional: false,
					},
					init: Some(Expression::ObjectExpression(Box::new_in(
						ObjectExpression {
							span: Span::default(),
							properties,
							trailing_comma: None,
						},
						allocator,
					))),
				}],
				allocator,
			),
		},
		allocator,
	))
}

#[cfg(test)]
pub(crate) mod test_util {
	use std::cell::Cell;

	use oxc::{
		allocator::{Allocator, FromIn},
		ast::ast::{Expression, IdentifierReference, JSXOpeningElement, Program, Statement},
		codegen::Codegen,
		parser::Parser,
		span::{Atom, SPAN, SourceType},
	};

	/// Parses `source` as JSX, failing the test on any syntax error.
	pub fn parse<'a>(allocator: &'a Allocator, source: &'a str) -> Program<'a> {
		let ret = Parser::new(allocator, source, SourceType::jsx()).parse();
		assert!(ret.errors.is_empty(), "{:?}", ret.errors);
		ret.program
	}

	/// Returns the opening element of the first statement, `<div ... />;`.
	pub fn opening_element<'p, 'a>(program: &'p mut Program<'a>) -> &'p mut JSXOpeningElement<'a> {
		let Some(Statement::ExpressionStatement(stmt)) = program.body.first_mut() else {
			panic!("expected an expression statement");
		};
		let Expression::JSXElement(elem) = &mut stmt.expression else {
			panic!("expected a JSX element");
		};
		&mut elem.opening_element
	}

	/// Creates an unresolved identifier reference.
	pub fn ident<'a>(allocator: &'a Allocator, name: &str) -> IdentifierReference<'a> {
		IdentifierReference {
			span: SPAN,
			name: Atom::from_in(name, allocator),
			reference_id: Cell::new(None),
		}
	}

	/// Prints `program`.
	pub fn print_program(program: &Program<'_>) -> String {
		Codegen::new().build(program).code
	}

	/// Prints `expr` as a standalone expression statement.
	pub fn print_expression<'a>(allocator: &'a Allocator, expr: Expression<'a>) -> String {
		let mut program = parse(allocator, "0;");
		let Some(Statement::ExpressionStatement(stmt)) = program.body.first_mut() else {
			panic!("expected an expression statement");
		};
		stmt.expression = expr;
		print_program(&program)
	}
}
