pub mod clip;
pub mod credit;
pub mod default;
pub mod global_404;
pub mod movie;
pub mod person;
pub mod upload;
pub mod user;

pub use clip::create::create_clip_handler;
pub use clip::get_clip::get_clips_handler;

pub use credit::cast::add_cast_handler;
pub use credit::crew::add_crew_handler;

pub use default::{default_route_handler, ping_handler};

pub use global_404::global_404_handler;

pub use movie::add::add_movie_handler;
pub use movie::create::create_movie_handler;
pub use movie::credits::movie_credits_handler;
pub use movie::get_movie::get_movie_handler;
pub use movie::get_movie::list_movies_handler;
pub use movie::get_movie::movie_summaries_handler;

pub use person::bulk::bulk_create_persons_handler;
pub use person::check::check_person_handler;
pub use person::create::create_person_handler;
pub use person::list::list_actors_handler;
pub use person::list::list_crew_members_handler;
pub use person::list::list_persons_handler;


pub use upload::image::upload_image_handler;

pub use user::create::create_user_handler;
pub use user::review::create_review_handler;
