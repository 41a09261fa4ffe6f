//! Serializes plain data into JavaScript literal expressions.

use oxc::{
	allocator::{Allocator, Box, FromIn, Vec},
	ast::ast::{
		ArrayExpression, BooleanLiteral, Expression, IdentifierName, NullLiteral, NumericLiteral,
		ObjectExpression, ObjectProperty, ObjectPropertyKind, PropertyKey, PropertyKind,
		StringLiteral,
	},
	span::{Atom, Span},
	syntax::{identifier::is_identifier_name, number::NumberBase},
};
use serde::Serialize;

use crate::nodes::string_literal;

/// Serializes `value` and converts the result with [`object_expression`].
pub fn serialize_expression<'a, T: Serialize>(
	allocator: &'a Allocator,
	span: Span,
	value: &T,
) -> Result<Expression<'a>, serde_json::Error> {
	let value = serde_json::to_value(value)?;
	Ok(object_expression(allocator, span, &value))
}

/// Converts a JSON value into the equivalent literal expression.
///
/// Object keys that are valid identifier names are emitted bare;
/// everything else is quoted.
pub fn object_expression<'a>(
	allocator: &'a Allocator,
	span: Span,
	value: &serde_json::Value,
) -> Expression<'a> {
	match value {
		serde_json::Value::Null => {
			Expression::NullLiteral(Box::new_in(NullLiteral { span }, allocator))
		}
		serde_json::Value::Bool(value) => Expression::BooleanLiteral(Box::new_in(
			BooleanLiteral {
				span,
				value: *value,
			},
			allocator,
		)),
		serde_json::Value::Number(number) => Expression::NumericLiteral(Box::new_in(
			NumericLiteral {
				span,
				value: number.as_f64().unwrap_or(f64::NAN),
				raw: None,
				base: NumberBase::Decimal,
			},
			allocator,
		)),
		serde_json::Value::String(value) => string_literal(allocator, span, value),
		serde_json::Value::Array(items) => Expression::ArrayExpression(Box::new_in(
			ArrayExpression {
				span,
				elements: Vec::from_iter_in(
					items
						.iter()
						.map(|item| object_expression(allocator, span, item).into()),
					allocator,
				),
				trailing_comma: None,
			},
			allocator,
		)),
		serde_json::Value::Object(entries) => Expression::ObjectExpression(Box::new_in(
			ObjectExpression {
				span,
				properties: Vec::from_iter_in(
					entries.iter().map(|(key, value)| {
						ObjectPropertyKind::ObjectProperty(Box::new_in(
							ObjectProperty {
								span,
								kind: PropertyKind::Init,
								key: property_key(allocator, span, key),
								value: object_expression(allocator, span, value),
								method: false,
								shorthand: false,
								computed: false,
							},
							allocator,
						))
					}),
					allocator,
				),
				trailing_comma: None,
			},
			allocator,
		)),
	}
}

/// Builds a non-computed property key for `key`.
fn property_key<'a>(allocator: &'a Allocator, span: Span, key: &str) -> PropertyKey<'a> {
	if is_identifier_name(key) {
		PropertyKey::StaticIdentifier(Box::new_in(
			IdentifierName {
				span,
				name: Atom::from_in(key, allocator),
			},
			allocator,
		))
	} else {
		PropertyKey::StringLiteral(Box::new_in(
			StringLiteral {
				span,
				value: Atom::from_in(key, allocator),
				raw: None,
				lossy: false,
			},
			allocator,
		))
	}
}
