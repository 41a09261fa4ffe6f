//! Holds constant string values used throughout the stylename rewriter.
#![allow(clippy::missing_docs_in_private_items)]
use oxc::span::Atom;

pub const HELPER_IDENT: &str = "_getClassName";
pub const IMPORT_MAP_IDENT: &str = "_styleModuleImportMap";

pub const CLASS_NAME: &str = "className";
pub const STYLE_NAME: &str = "styleName";

pub const DEFAULT_HELPER_SOURCE: &str = "babel-plugin-react-css-modules/dist/browser/getClassName";
pub const DEFAULT_FILETYPE: &str = ".css";

pub const HELPER: Atom<'static> = Atom::new_const(HELPER_IDENT);
pub const IMPORT_MAP: Atom<'static> = Atom::new_const(IMPORT_MAP_IDENT);
