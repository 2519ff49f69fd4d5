pub use schoolhub_models::students::*;
