pub mod create;
pub mod review;
