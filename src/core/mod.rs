pub mod codec;
pub mod reference;
pub mod timeline;
