pub mod editor;
pub mod reference;
pub mod settings;
