//! Combines two class-name producing expressions.

use oxc::{
	allocator::{Allocator, Box, CloneIn},
	ast::ast::{BinaryExpression, BinaryOperator, ConditionalExpression, Expression},
	span::GetSpan,
};

use crate::nodes::string_literal;

/// Builds `(class_name ? class_name + " " : "") + style_name`.
///
/// An empty or otherwise falsy `class_name` contributes nothing, so the
/// result never carries a stray leading space.
pub fn conditional_class_merge<'a>(
	allocator: &'a Allocator,
	class_name: Expression<'a>,
	style_name: Expression<'a>,
) -> Expression<'a> {
	let span = class_name.span();

	let spaced = Expression::BinaryExpression(Box::new_in(
		BinaryExpression {
			span,
			left: class_name.clone_in(allocator),
			operator: BinaryOperator::Addition,
			right: string_literal(allocator, span, " "),
		},
		allocator,
	));

	let prefix = Expression::ConditionalExpression(Box::new_in(
		ConditionalExpression {
			span,
			test: class_name,
			consequent: spaced,
			alternate: string_literal(allocator, span, ""),
		},
		allocator,
	));

	Expression::BinaryExpression(Box::new_in(
		BinaryExpression {
			span,
			left: prefix,
			operator: BinaryOperator::Addition,
			right: style_name,
		},
		allocator,
	))
}

#[cfg(test)]
mod tests {
	use oxc::span::SPAN;

	use super::*;
	use crate::{nodes::identifier, test_util::print_expression};

	#[test]
	fn merge_guards_empty_class_name() {
		let allocator = Allocator::default();
		let merged = conditional_class_merge(
			&allocator,
			identifier(&allocator, SPAN, "a"),
			identifier(&allocator, SPAN, "b"),
		);

		let Expression::BinaryExpression(outer) = &merged else {
			panic!("expected a binary expression");
		};
		assert_eq!(outer.operator, BinaryOperator::Addition);
		assert!(matches!(outer.left, Expression::ConditionalExpression(_)));
		assert!(matches!(&outer.right, Expression::Identifier(id) if id.name.as_str() == "b"));

		let code = print_expression(&allocator, merged);
		assert!(code.contains(r#"(a ? a + " " : "") + b"#), "{code}");
	}
}
