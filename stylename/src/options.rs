//! Options accepted by the rewriter and the traverser that drives it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::{CLASS_NAME, DEFAULT_FILETYPE, DEFAULT_HELPER_SOURCE, STYLE_NAME};

/// What the runtime helper does when a style name cannot be found
/// in any of the imported style modules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleMissingStyleName {
	/// Throw an error at runtime.
	#[default]
	Throw,
	/// Log a warning at runtime.
	Warn,
	/// Silently ignore the missing name.
	Ignore,
}

/// The options forwarded to the runtime `getClassName` helper.
///
/// These are only emitted into the generated call when at least one
/// of them differs from its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GetClassNameOptions {
	/// Policy for style names missing from the import map.
	pub handle_missing_style_name: HandleMissingStyleName,
	/// Whether anonymous style names may be resolved when more than
	/// one style module is imported.
	pub auto_resolve_multiple_imports: bool,
}

impl GetClassNameOptions {
	/// Returns whether any tracked option differs from its documented default.
	#[must_use]
	pub fn differs_from_default(&self) -> bool {
		let defaults = Self::default();
		self.handle_missing_style_name != defaults.handle_missing_style_name
			|| self.auto_resolve_multiple_imports != defaults.auto_resolve_multiple_imports
	}
}

/// The full set of options for a stylename transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PluginOptions {
	/// Maps source attribute names to the destination attribute
	/// they are merged into, processed in the order given.
	pub attribute_names: IndexMap<String, String>,
	/// Import source suffixes that mark an import as a style module.
	pub filetypes: Vec<String>,
	/// See [`GetClassNameOptions::handle_missing_style_name`].
	pub handle_missing_style_name: HandleMissingStyleName,
	/// See [`GetClassNameOptions::auto_resolve_multiple_imports`].
	pub auto_resolve_multiple_imports: bool,
	/// The module the runtime helper is imported from.
	pub helper_import_source: String,
}

impl Default for PluginOptions {
	fn default() -> Self {
		Self {
			attribute_names: IndexMap::from([(STYLE_NAME.to_string(), CLASS_NAME.to_string())]),
			filetypes: vec![DEFAULT_FILETYPE.to_string()],
			handle_missing_style_name: HandleMissingStyleName::default(),
			auto_resolve_multiple_imports: false,
			helper_import_source: DEFAULT_HELPER_SOURCE.to_string(),
		}
	}
}

impl PluginOptions {
	/// Parses options from a JSON document. Missing keys take their defaults.
	pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(source)
	}

	/// Returns the subset of options forwarded to the runtime helper.
	#[must_use]
	pub fn get_class_name_options(&self) -> GetClassNameOptions {
		GetClassNameOptions {
			handle_missing_style_name: self.handle_missing_style_name,
			auto_resolve_multiple_imports: self.auto_resolve_multiple_imports,
		}
	}

	/// Returns whether an import from `source` is a style module.
	#[must_use]
	pub fn is_style_module(&self, source: &str) -> bool {
		self.filetypes.iter().any(|ext| source.ends_with(ext.as_str()))
	}
}
