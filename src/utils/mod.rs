pub mod embed;
pub mod error_handler;
pub mod misc;
pub mod validation;

pub use embed::to_embed_url;
pub use error_handler::AppError;
pub use misc::*;
pub use validation::ValidatedBody;
