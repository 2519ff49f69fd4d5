pub use schoolhub_models::auth::*;
pub use schoolhub_models::users::{User, UserRole};
