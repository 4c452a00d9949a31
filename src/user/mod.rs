pub mod model;
pub mod repository;
pub mod service;

pub use model::{User, UserRequest};
pub use repository::{PgUserRepository, RepositoryError, UserRepository};
pub use service::UserService;
