pub mod clip;
pub mod credit;
pub mod media;
pub mod movie;
pub mod person;
pub mod request_schema;
pub mod response_schema;
pub mod review;
pub mod user;

pub use clip::*;
pub use credit::*;
pub use media::*;
pub use movie::*;
pub use person::*;
pub use request_schema::*;
pub use response_schema::*;
pub use review::*;
pub use user::*;
