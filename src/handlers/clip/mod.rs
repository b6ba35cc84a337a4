pub mod create;
pub mod get_clip;
pub mod helper;
