mod oxc_impl;

use oxc::{
	allocator::Allocator,
	ast::ast::{
		IdentifierReference, ImportDeclaration, ImportDeclarationSpecifier, JSXAttributeItem,
		JSXAttributeName, JSXAttributeValue, JSXOpeningElement, Program, Statement,
	},
	diagnostics::OxcDiagnostic,
	semantic::{ReferenceFlags, ReferenceId},
	span::{Atom, Span},
};
use oxc_traverse::TraverseCtx;

use crate::{options::PluginOptions, rewrite::AttributeRewriter};

/// A default or namespace import of a style module.
pub struct StyleModule<'a> {
	/// The local binding name, e.g. `styles`.
	pub name: Atom<'a>,
	/// The import specifier's span.
	pub span: Span,
	/// A read reference to the binding, for the import map.
	pub reference_id: Option<ReferenceId>,
}

/// Traverser for styleName attributes.
pub struct StyleNameTraverser<'a> {
	/// The options the transformation runs with.
	pub options: PluginOptions,
	/// Reference to the runtime helper.
	pub helper: IdentifierReference<'a>,
	/// Reference to the style module import map.
	pub import_map: IdentifierReference<'a>,
	/// Style modules imported by the program, in source order.
	pub style_modules: std::vec::Vec<StyleModule<'a>>,
	/// Whether any helper call was emitted.
	pub helper_used: bool,
	/// Whether any element was rewritten, and so refers to the import map.
	pub import_map_used: bool,
	/// The underlying Bumpalo allocator.
	pub allocator: &'a Allocator,
	/// Any diagnostics that were emitted during transformation.
	pub errors: std::vec::Vec<OxcDiagnostic>,
}

impl<'a> StyleNameTraverser<'a> {
	/// Creates a new traverser using the given Bumpalo allocator.
	pub fn new_in(
		options: PluginOptions,
		helper: IdentifierReference<'a>,
		import_map: IdentifierReference<'a>,
		allocator: &'a Allocator,
	) -> Self {
		Self {
			options,
			helper,
			import_map,
			style_modules: std::vec::Vec::new(),
			helper_used: false,
			import_map_used: false,
			allocator,
			errors: std::vec::Vec::new(),
		}
	}

	/// Registers every style module import before any element is visited,
	/// since imports are hoisted above the JSX that uses them.
	pub(crate) fn inner_enter_program(&mut self, program: &Program<'a>, ctx: &mut TraverseCtx<'a>) {
		for stmt in &program.body {
			if let Statement::ImportDeclaration(decl) = stmt {
				self.register_style_import(decl, ctx);
			}
		}
	}

	/// Records the bindings of an import whose source is a style module.
	fn register_style_import(
		&mut self,
		node: &ImportDeclaration<'a>,
		ctx: &mut TraverseCtx<'a>,
	) {
		if !self.options.is_style_module(node.source.value.as_str()) {
			return;
		}

		let Some(specifiers) = &node.specifiers else {
			return;
		};

		for specifier in specifiers {
			let local = match specifier {
				ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => &spec.local,
				ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => &spec.local,
				ImportDeclarationSpecifier::ImportSpecifier(spec) => {
					self.errors.push(
						OxcDiagnostic::warn(format!(
							"named import `{}` from a style module is not added to the import map",
							spec.local.name
						))
						.with_help("use a default import: `import styles from '...'`")
						.with_label(spec.span),
					);
					continue;
				}
			};

			let reference_id = local.symbol_id.get().map(|sym| {
				ctx.create_reference(local.name.as_str(), Some(sym), ReferenceFlags::Read)
			});

			tracing::debug!(name = %local.name, source = %node.source.value, "style module import");

			self.style_modules.push(StyleModule {
				name: local.name,
				span: local.span,
				reference_id,
			});
		}
	}

	/// Runs the rewriter for every configured source attribute on `node`.
	pub(crate) fn inner_exit_jsx_opening_element(&mut self, node: &mut JSXOpeningElement<'a>) {
		if self.style_modules.is_empty() {
			tracing::trace!("no style modules imported; skipping element");
			return;
		}

		let class_name_options = self.options.get_class_name_options();

		for (source_name, destination_name) in &self.options.attribute_names {
			let Some(index) = node
				.attributes
				.iter()
				.position(|item| is_named(item, source_name))
			else {
				continue;
			};

			if let JSXAttributeItem::Attribute(attr) = &node.attributes[index]
				&& let Some(JSXAttributeValue::StringLiteral(lit)) = &attr.value
			{
				self.errors.push(
					OxcDiagnostic::warn(format!(
						"string `{source_name}` values are not rewritten"
					))
					.with_help(format!(
						"use an expression instead: `{source_name}={{styles.{}}}`",
						lit.value
					))
					.with_label(attr.span),
				);
				continue;
			}

			let mut rewriter = AttributeRewriter::new(
				self.allocator,
				&self.helper,
				&self.import_map,
				class_name_options,
				&mut self.errors,
			);
			let result = rewriter.rewrite(&mut node.attributes, index, destination_name);
			let helper_calls = rewriter.helper_calls();

			self.helper_used |= helper_calls > 0;
			match result {
				Ok(()) => self.import_map_used = true,
				Err(err) => self.errors.push(err.into()),
			}
		}
	}
}

/// Returns whether `item` is a plain attribute called `name`.
fn is_named(item: &JSXAttributeItem<'_>, name: &str) -> bool {
	match item {
		JSXAttributeItem::Attribute(attr) => {
			matches!(&attr.name, JSXAttributeName::Identifier(ident) if ident.name.as_str() == name)
		}
		JSXAttributeItem::SpreadAttribute(_) => false,
	}
}
