pub mod bulk;
pub mod check;
pub mod create;
pub mod helper;
pub mod list;
