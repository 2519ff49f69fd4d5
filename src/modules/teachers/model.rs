//! Teacher models, shared with the CLI through `schoolhub-models`.

pub use schoolhub_models::teachers::*;
