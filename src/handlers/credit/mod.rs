pub mod cast;
pub mod crew;
pub mod helper;
