pub mod helper;

pub use helper::body_json;
pub use helper::build_get_request;
pub use helper::build_post_request;
pub use helper::test_app;
pub use helper::GenericResponse;
