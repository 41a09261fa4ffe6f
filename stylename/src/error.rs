//! Errors raised while rewriting a single element.

use oxc::{diagnostics::OxcDiagnostic, span::Span};

/// A fatal error for the element being rewritten.
///
/// The traverser converts these into [`OxcDiagnostic`]s and moves on to the
/// next element.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
	/// The destination attribute holds a value that cannot be merged with.
	#[error("unexpected value for `{name}` attribute: {kind}")]
	UnsupportedAttributeValue {
		/// The destination attribute name.
		name: String,
		/// A description of the offending value.
		kind: &'static str,
		/// Where the offending value sits in the source.
		span: Span,
	},
	/// The source attribute does not wrap an expression.
	#[error("`{name}` attribute must hold an expression, found {kind}")]
	InvalidSourceValue {
		/// The source attribute name.
		name: String,
		/// A description of the offending value.
		kind: &'static str,
		/// Where the offending value sits in the source.
		span: Span,
	},
	/// The helper options could not be turned into an object literal.
	#[error("failed to serialize helper options: {0}")]
	SerializeOptions(#[from] serde_json::Error),
}

impl RewriteError {
	/// The location of the offending value.
	#[must_use]
	pub fn span(&self) -> Option<Span> {
		match self {
			Self::UnsupportedAttributeValue { span, .. } | Self::InvalidSourceValue { span, .. } => {
				Some(*span)
			}
			Self::SerializeOptions(_) => None,
		}
	}
}

impl From<RewriteError> for OxcDiagnostic {
	fn from(err: RewriteError) -> Self {
		let help = match &err {
			RewriteError::UnsupportedAttributeValue { .. } => {
				"the destination attribute must be absent, a string, or an `{expression}`"
			}
			RewriteError::InvalidSourceValue { .. } => "wrap the value in braces: `{expression}`",
			RewriteError::SerializeOptions(_) => "helper options must be representable as JSON",
		};
		let span = err.span();
		let diagnostic = OxcDiagnostic::error(err.to_string()).with_help(help);
		match span {
			Some(span) => diagnostic.with_label(span),
			None => diagnostic,
		}
	}
}
