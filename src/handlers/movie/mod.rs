pub mod add;
pub mod create;
pub mod credits;
pub mod get_movie;
pub mod helper;
