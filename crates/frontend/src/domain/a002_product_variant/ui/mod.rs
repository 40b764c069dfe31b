pub mod editor;
pub mod form;

pub use editor::VariantEditor;
