//! Merges a `styleName`-like attribute into its destination attribute.
//!
//! The source expression is resolved against the style module import map
//! where its shape allows it (`styles.foo` becomes
//! `_styleModuleImportMap.styles.foo`), and deferred to the runtime
//! `getClassName` helper otherwise. The result is then combined with
//! whatever the destination attribute already held.

use oxc::{
	allocator::{Allocator, Box, CloneIn, Vec},
	ast::ast::{
		Argument, BinaryExpression, BinaryOperator, Expression, IdentifierReference,
		JSXAttribute, JSXAttributeItem, JSXAttributeName, JSXAttributeValue, JSXExpression,
	},
	diagnostics::{OxcDiagnostic, Severity},
	span::{Atom, GetSpan, SPAN, Span},
};

use crate::{
	constants::CLASS_NAME, error::RewriteError, merge::conditional_class_merge, nodes,
	object_expression::serialize_expression, options::GetClassNameOptions,
};

/// Signature of the function that combines an existing destination
/// expression with the rewritten source expression.
pub type MergeFn<'a> = fn(&'a Allocator, Expression<'a>, Expression<'a>) -> Expression<'a>;

/// Rewrites source attributes of JSX elements into their destination
/// attributes.
pub struct AttributeRewriter<'r, 'a> {
	/// The arena new nodes are allocated in.
	allocator: &'a Allocator,
	/// The imported runtime helper.
	helper: &'r IdentifierReference<'a>,
	/// The style module import map.
	import_map: &'r IdentifierReference<'a>,
	/// Options forwarded to the runtime helper.
	options: GetClassNameOptions,
	/// Combines a dynamic destination with the rewritten source.
	merge: MergeFn<'a>,
	/// Where non-fatal diagnostics go.
	diagnostics: &'r mut std::vec::Vec<OxcDiagnostic>,
	/// The number of runtime helper calls emitted so far.
	helper_calls: usize,
}

/// The current contents of the destination attribute.
enum Destination<'a> {
	/// No destination attribute.
	Absent,
	/// `name="literal"`.
	Literal(Atom<'a>, Span),
	/// `name={expression}`.
	Expression(Expression<'a>),
}

impl<'r, 'a> AttributeRewriter<'r, 'a> {
	/// Creates a new rewriter that merges with [`conditional_class_merge`].
	pub fn new(
		allocator: &'a Allocator,
		helper: &'r IdentifierReference<'a>,
		import_map: &'r IdentifierReference<'a>,
		options: GetClassNameOptions,
		diagnostics: &'r mut std::vec::Vec<OxcDiagnostic>,
	) -> Self {
		Self {
			allocator,
			helper,
			import_map,
			options,
			merge: conditional_class_merge,
			diagnostics,
			helper_calls: 0,
		}
	}

	/// Replaces the merge function used for dynamic destinations.
	#[must_use]
	pub fn with_merge(mut self, merge: MergeFn<'a>) -> Self {
		self.merge = merge;
		self
	}

	/// The number of runtime helper calls emitted by this rewriter.
	#[must_use]
	pub fn helper_calls(&self) -> usize {
		self.helper_calls
	}

	/// Merges the attribute at `source_index` into `destination_name`.
	///
	/// Both the source attribute and the first other attribute named
	/// `destination_name` are removed, and a single merged attribute is
	/// appended. On error the attribute list is left untouched.
	pub fn rewrite(
		&mut self,
		attributes: &mut Vec<'a, JSXAttributeItem<'a>>,
		source_index: usize,
		destination_name: &str,
	) -> Result<(), RewriteError> {
		let source_name = attributes
			.get(source_index)
			.map_or_else(String::new, attribute_display_name);
		check_source(attributes.get(source_index), &source_name)?;

		let destination_index = attributes.iter().enumerate().position(|(i, item)| {
			i != source_index && attribute_name(item) == Some(destination_name)
		});
		if let Some(index) = destination_index {
			check_destination(&attributes[index], destination_name)?;
		}

		let options_argument = if self.options.differs_from_default() {
			Some(serialize_expression(self.allocator, SPAN, &self.options)?)
		} else {
			None
		};

		// Remove the higher index first so the lower one stays valid.
		let (source, destination) = match destination_index {
			Some(index) if index > source_index => {
				let destination = attributes.remove(index);
				(attributes.remove(source_index), Some(destination))
			}
			Some(index) => {
				let source = attributes.remove(source_index);
				(source, Some(attributes.remove(index)))
			}
			None => (attributes.remove(source_index), None),
		};

		let (source_span, source_expression) = source_expression(source, &source_name)?;
		let destination = match destination {
			Some(item) => destination_value(item, destination_name)?,
			None => Destination::Absent,
		};

		let style_name = if source_name == CLASS_NAME {
			self.classify(source_expression, options_argument.as_ref())
		} else {
			self.helper_call(source_expression, options_argument.as_ref())
		};

		let merged = match destination {
			Destination::Absent => style_name,
			Destination::Literal(value, span) => {
				let prefix = format!("{} ", nodes::decode_html_entities(self.allocator, value));
				Expression::BinaryExpression(Box::new_in(
					BinaryExpression {
						span,
						left: nodes::string_literal(self.allocator, span, &prefix),
						operator: BinaryOperator::Addition,
						right: style_name,
					},
					self.allocator,
				))
			}
			Destination::Expression(existing) => (self.merge)(self.allocator, existing, style_name),
		};

		tracing::debug!(
			source = %source_name,
			destination = destination_name,
			"merged attribute"
		);

		attributes.push(nodes::expression_attribute(
			self.allocator,
			source_span,
			destination_name,
			merged,
		));

		Ok(())
	}

	/// Resolves `expression` against the import map where its shape allows,
	/// falling back to a runtime helper call.
	fn classify(
		&mut self,
		expression: Expression<'a>,
		options_argument: Option<&Expression<'a>>,
	) -> Expression<'a> {
		let expression = strip_parentheses(expression);

		if let Some((object, property)) = member_path(&expression) {
			return self.import_map_lookup(expression.span(), object, property);
		}

		match expression {
			Expression::StringLiteral(_)
			| Expression::Identifier(_)
			| Expression::ConditionalExpression(_) => expression,
			Expression::TemplateLiteral(mut template) => {
				for slot in template.expressions.iter_mut() {
					let inner = nodes::take_expression(self.allocator, slot);
					*slot = self.classify(inner, options_argument);
				}
				Expression::TemplateLiteral(template)
			}
			other => {
				let kind = expression_kind(&other);
				tracing::debug!(kind, "expression cannot be resolved statically");
				self.diagnostics.push(
					OxcDiagnostic::warn(format!(
						"{kind} is resolved at runtime through the class name helper"
					))
					.with_severity(Severity::Advice)
					.with_label(other.span()),
				);
				self.helper_call(other, options_argument)
			}
		}
	}

	/// Builds `helper(expression, importMap[, options])`.
	fn helper_call(
		&mut self,
		expression: Expression<'a>,
		options_argument: Option<&Expression<'a>>,
	) -> Expression<'a> {
		let span = expression.span();
		let mut arguments = Vec::with_capacity_in(3, self.allocator);
		arguments.push(Argument::from(expression));
		arguments.push(Argument::from(nodes::reference(
			self.allocator,
			self.import_map,
		)));
		if let Some(options) = options_argument {
			arguments.push(Argument::from(options.clone_in(self.allocator)));
		}

		self.helper_calls += 1;
		nodes::call(
			self.allocator,
			span,
			nodes::reference(self.allocator, self.helper),
			arguments,
		)
	}

	/// Builds `importMap.object.property`.
	fn import_map_lookup(&self, span: Span, object: Atom<'a>, property: Atom<'a>) -> Expression<'a> {
		let module = nodes::member(
			self.allocator,
			span,
			nodes::reference(self.allocator, self.import_map),
			&object,
		);
		nodes::member(self.allocator, span, module, &property)
	}
}

/// Returns the plain (non-namespaced) name of an attribute.
fn attribute_name<'b>(item: &'b JSXAttributeItem<'_>) -> Option<&'b str> {
	match item {
		JSXAttributeItem::Attribute(attr) => match &attr.name {
			JSXAttributeName::Identifier(ident) => Some(ident.name.as_str()),
			JSXAttributeName::NamespacedName(_) => None,
		},
		JSXAttributeItem::SpreadAttribute(_) => None,
	}
}

/// Returns the attribute's name as written, for diagnostics.
fn attribute_display_name(item: &JSXAttributeItem<'_>) -> String {
	match item {
		JSXAttributeItem::Attribute(attr) => match &attr.name {
			JSXAttributeName::Identifier(ident) => ident.name.to_string(),
			JSXAttributeName::NamespacedName(ns) => {
				format!("{}:{}", ns.namespace.name, ns.name.name)
			}
		},
		JSXAttributeItem::SpreadAttribute(_) => "...".to_string(),
	}
}

/// Describes a value that cannot appear where an expression was expected.
fn value_kind(value: Option<&JSXAttributeValue<'_>>) -> Option<&'static str> {
	match value {
		None => Some("no value"),
		Some(JSXAttributeValue::StringLiteral(_)) => Some("a string literal"),
		Some(JSXAttributeValue::Element(_)) => Some("a JSX element"),
		Some(JSXAttributeValue::Fragment(_)) => Some("a JSX fragment"),
		Some(JSXAttributeValue::ExpressionContainer(container)) => {
			match container.expression {
				JSXExpression::EmptyExpression(_) => Some("an empty expression"),
				_ => None,
			}
		}
	}
}

/// Ensures the source attribute wraps an expression.
fn check_source(item: Option<&JSXAttributeItem<'_>>, name: &str) -> Result<(), RewriteError> {
	let invalid = |kind, span| {
		RewriteError::InvalidSourceValue {
			name: name.to_string(),
			kind,
			span,
		}
	};
	match item {
		None => Err(invalid("a missing attribute", SPAN)),
		Some(JSXAttributeItem::SpreadAttribute(spread)) => {
			Err(invalid("a spread attribute", spread.span))
		}
		Some(JSXAttributeItem::Attribute(attr)) => {
			match value_kind(attr.value.as_ref()) {
				Some(kind) => Err(invalid(kind, attr.span)),
				None => Ok(()),
			}
		}
	}
}

/// Ensures the destination attribute holds a mergeable value.
fn check_destination(item: &JSXAttributeItem<'_>, name: &str) -> Result<(), RewriteError> {
	let JSXAttributeItem::Attribute(attr) = item else {
		return Ok(());
	};
	let span = attr.value.as_ref().map_or(attr.span, |value| value.span());
	match &attr.value {
		Some(JSXAttributeValue::StringLiteral(_)) => Ok(()),
		value => {
			match value_kind(value.as_ref()) {
				Some(kind) => {
					Err(RewriteError::UnsupportedAttributeValue {
						name: name.to_string(),
						kind,
						span,
					})
				}
				None => Ok(()),
			}
		}
	}
}

/// Unwraps an attribute item into its plain attribute.
fn into_attribute<'a>(item: JSXAttributeItem<'a>) -> Option<JSXAttribute<'a>> {
	match item {
		JSXAttributeItem::Attribute(attr) => Some(attr.unbox()),
		JSXAttributeItem::SpreadAttribute(_) => None,
	}
}

/// Takes the expression out of a source attribute.
fn source_expression<'a>(
	item: JSXAttributeItem<'a>,
	name: &str,
) -> Result<(Span, Expression<'a>), RewriteError> {
	let span = item.span();
	let invalid = |kind| {
		RewriteError::InvalidSourceValue {
			name: name.to_string(),
			kind,
			span,
		}
	};
	match into_attribute(item).and_then(|attr| attr.value) {
		Some(JSXAttributeValue::ExpressionContainer(container)) => {
			match container.unbox().expression {
				JSXExpression::EmptyExpression(_) => Err(invalid("an empty expression")),
				expression => Ok((span, expression.into_expression())),
			}
		}
		value => Err(invalid(value_kind(value.as_ref()).unwrap_or("a spread attribute"))),
	}
}

/// Takes the current value out of a destination attribute.
fn destination_value<'a>(
	item: JSXAttributeItem<'a>,
	name: &str,
) -> Result<Destination<'a>, RewriteError> {
	let span = item.span();
	let unsupported = |kind| {
		RewriteError::UnsupportedAttributeValue {
			name: name.to_string(),
			kind,
			span,
		}
	};
	let Some(attr) = into_attribute(item) else {
		return Err(unsupported("a spread attribute"));
	};
	match attr.value {
		None => Err(unsupported("no value")),
		Some(JSXAttributeValue::StringLiteral(lit)) => Ok(Destination::Literal(lit.value, lit.span)),
		Some(JSXAttributeValue::ExpressionContainer(container)) => {
			match container.unbox().expression {
				JSXExpression::EmptyExpression(_) => Err(unsupported("an empty expression")),
				expression => Ok(Destination::Expression(expression.into_expression())),
			}
		}
		Some(JSXAttributeValue::Element(_)) => Err(unsupported("a JSX element")),
		Some(JSXAttributeValue::Fragment(_)) => Err(unsupported("a JSX fragment")),
	}
}

/// Removes any parentheses wrapping `expression`.
fn strip_parentheses(mut expression: Expression<'_>) -> Expression<'_> {
	loop {
		match expression {
			Expression::ParenthesizedExpression(paren) => expression = paren.unbox().expression,
			other => return other,
		}
	}
}

/// Returns `(object, property)` for `object.property` and
/// `object["property"]` where `object` is a plain identifier.
fn member_path<'a>(expression: &Expression<'a>) -> Option<(Atom<'a>, Atom<'a>)> {
	match expression {
		Expression::StaticMemberExpression(member) => {
			match &member.object {
				Expression::Identifier(object) => Some((object.name, member.property.name)),
				_ => None,
			}
		}
		Expression::ComputedMemberExpression(member) => {
			match (&member.object, &member.expression) {
				(Expression::Identifier(object), Expression::StringLiteral(property)) => {
					Some((object.name, property.value))
				}
				_ => None,
			}
		}
		_ => None,
	}
}

/// A human readable name for the kind of `expression`.
fn expression_kind(expression: &Expression<'_>) -> &'static str {
	match expression {
		Expression::CallExpression(_) => "call expression",
		Expression::LogicalExpression(_) => "logical expression",
		Expression::BinaryExpression(_) => "binary expression",
		Expression::ArrowFunctionExpression(_) => "arrow function",
		Expression::FunctionExpression(_) => "function expression",
		Expression::ArrayExpression(_) => "array expression",
		Expression::ObjectExpression(_) => "object expression",
		Expression::StaticMemberExpression(_)
		| Expression::ComputedMemberExpression(_)
		| Expression::PrivateFieldExpression(_) => "member expression",
		Expression::TaggedTemplateExpression(_) => "tagged template",
		Expression::NumericLiteral(_) => "numeric literal",
		Expression::AwaitExpression(_) => "await expression",
		Expression::SequenceExpression(_) => "sequence expression",
		_ => "expression",
	}
}
