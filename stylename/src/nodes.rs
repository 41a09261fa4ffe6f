//! Small node constructors shared by the rewriter and the traverser.

use std::cell::Cell;

use oxc::{
	allocator::{Allocator, Box, FromIn, Vec},
	ast::ast::{
		Argument, CallExpression, ComputedMemberExpression, Expression, IdentifierName,
		IdentifierReference, JSXAttribute, JSXAttributeItem, JSXAttributeName,
		JSXAttributeValue, JSXExpressionContainer, JSXIdentifier, NullLiteral, StaticMemberExpression,
		StringLiteral,
	},
	span::{Atom, GetSpan, Span},
	syntax::identifier::is_identifier_name,
};

/// Creates a string literal expression without a raw value,
/// so codegen prints it from `value`.
pub fn string_literal<'a>(allocator: &'a Allocator, span: Span, value: &str) -> Expression<'a> {
	Expression::StringLiteral(Box::new_in(
		StringLiteral {
			span,
			value: Atom::from_in(value, allocator),
			raw: None,
			lossy: false,
		},
		allocator,
	))
}

/// Decodes the HTML entities JSX allows in attribute strings.
pub fn decode_html_entities<'a>(allocator: &'a Allocator, value: Atom<'a>) -> Atom<'a> {
	let decoded = htmlentity::entity::decode(value.as_bytes()).bytes();
	let decoded = String::from_utf8_lossy(decoded.as_ref());
	Atom::from_in(decoded.as_ref(), allocator)
}

/// Creates another use of `reference` as an expression, keeping its
/// reference id.
pub fn reference<'a>(allocator: &'a Allocator, reference: &IdentifierReference<'a>) -> Expression<'a> {
	Expression::Identifier(Box::new_in(
		IdentifierReference {
			span: reference.span,
			name: reference.name,
			reference_id: Cell::new(reference.reference_id.get()),
		},
		allocator,
	))
}

/// Creates `object.property`, falling back to `object["property"]`
/// when `property` is not a valid identifier name.
pub fn member<'a>(
	allocator: &'a Allocator,
	span: Span,
	object: Expression<'a>,
	property: &str,
) -> Expression<'a> {
	if is_identifier_name(property) {
		Expression::StaticMemberExpression(Box::new_in(
			StaticMemberExpression {
				span,
				object,
				property: IdentifierName {
					span,
					name: Atom::from_in(property, allocator),
				},
				optional: false,
			},
			allocator,
		))
	} else {
		Expression::ComputedMemberExpression(Box::new_in(
			ComputedMemberExpression {
				span,
				object,
				expression: string_literal(allocator, span, property),
				optional: false,
			},
			allocator,
		))
	}
}

/// Creates an identifier reference expression with no resolved reference.
pub fn identifier<'a>(allocator: &'a Allocator, span: Span, name: &str) -> Expression<'a> {
	Expression::Identifier(Box::new_in(
		IdentifierReference {
			span,
			name: Atom::from_in(name, allocator),
			reference_id: Cell::new(None),
		},
		allocator,
	))
}

/// Creates `callee(arguments...)`.
pub fn call<'a>(
	allocator: &'a Allocator,
	span: Span,
	callee: Expression<'a>,
	arguments: Vec<'a, Argument<'a>>,
) -> Expression<'a> {
	Expression::CallExpression(Box::new_in(
		CallExpression {
			span,
			callee,
			type_arguments: None,
			arguments,
			optional: false,
			pure: false,
		},
		allocator,
	))
}

/// Creates `name={expression}`.
pub fn expression_attribute<'a>(
	allocator: &'a Allocator,
	span: Span,
	name: &str,
	expression: Expression<'a>,
) -> JSXAttributeItem<'a> {
	JSXAttributeItem::Attribute(Box::new_in(
		JSXAttribute {
			span,
			name: JSXAttributeName::Identifier(Box::new_in(
				JSXIdentifier {
					span,
					name: Atom::from_in(name, allocator),
				},
				allocator,
			)),
			value: Some(JSXAttributeValue::ExpressionContainer(
				Box::new_in(
					JSXExpressionContainer {
						span,
						expression: expression.into(),
					},
					allocator,
				),
			)),
		},
		allocator,
	))
}

/// Moves the expression out of `slot`, leaving a `null` literal behind.
pub fn take_expression<'a>(allocator: &'a Allocator, slot: &mut Expression<'a>) -> Expression<'a> {
	let span = slot.span();
	std::mem::replace(
		slot,
		Expression::NullLiteral(Box::new_in(NullLiteral { span }, allocator)),
	)
}
