pub mod escape;
pub mod native;
pub mod subrip;
