//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod god;
pub mod mythology;

pub use validation::{positive_id, ValidationError};
pub use god::{Alias, God, GodInput, GodName};
pub use mythology::Mythology;
