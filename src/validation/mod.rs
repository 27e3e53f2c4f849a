//! Input validation for submitted match results

pub mod validator;

pub use validator::{validate, ValidationOutcome, MIN_PLAYERS};
