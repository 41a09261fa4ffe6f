use oxc::ast::ast::{JSXOpeningElement, Program};
use oxc_traverse::{Traverse, TraverseCtx};

impl<'a> Traverse<'a> for super::StyleNameTraverser<'a> {
	fn enter_program(&mut self, node: &mut Program<'a>, ctx: &mut TraverseCtx<'a>) {
		self.inner_enter_program(node, ctx);
	}

	fn exit_jsx_opening_element(
		&mut self,
		node: &mut JSXOpeningElement<'a>,
		_ctx: &mut TraverseCtx<'a>,
	) {
		self.inner_exit_jsx_opening_element(node);
	}
}
