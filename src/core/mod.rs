pub mod alerts;
pub mod errors;
pub mod inference;
pub mod prompt;
pub mod services;
pub mod traits;
