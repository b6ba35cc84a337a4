pub const DEFAULT_PORT: u16 = 3000;
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MONGO_MIN_POOL_SIZE: u32 = 5;
pub const MONGO_MAX_POOL_SIZE: u32 = 10;
pub const MONGO_CONN_TIMEOUT: u64 = 10;
pub const AWS_BUCKET: &str = "movie-poster";
pub const IMAGE_CACHE_CONTROL: &str = "max-age=3600";
// SigV4 presigned urls cannot outlive 7 days
pub const SIGNED_URL_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;
pub const IMAGE_UPLOAD_BODY_LIMIT: usize = 20 * 1024 * 1024;
pub const IMAGE_FOLDERS: [&str; 3] = ["Actors", "vPosters", "hPosters"];

pub const MOVIE_RATING_MIN: f64 = 0.0;
pub const MOVIE_RATING_MAX: f64 = 10.0;
pub const REVIEW_RATING_MIN: f64 = 0.0;
pub const REVIEW_RATING_MAX: f64 = 5.0;

pub const EMBED_URL_PREFIX: &str = "https://www.youtube.com/embed/";

pub const DB_NAME: &str = "movieCatalog";

pub const COLL_MOVIES: &str = "movies";
pub const COLL_PERSONS: &str = "castCrew";
pub const COLL_MOVIE_CASTS: &str = "movieCasts";
pub const COLL_MOVIE_CREWS: &str = "movieCrews";
pub const COLL_CLIPS: &str = "clips";
pub const COLL_SERIES: &str = "series";
pub const COLL_SEASONS: &str = "seasons";
pub const COLL_USERS: &str = "users";
pub const COLL_REVIEWS: &str = "reviews";

pub const MONGO_DUPLICATE_KEY_CODE: i32 = 11000;
pub const MONGO_WRITE_CONFLICT_CODE: i32 = 112;
