//! Shared types, configuration, errors, and input validation for Hearth.

pub mod config;
pub mod error;
pub mod forms;
pub mod types;

pub use config::{HearthConfig, OpenAiConfig};
pub use error::{HearthError, Result};
pub use forms::{AccountForm, AccountTypeForm, PersonForm};
pub use types::{Account, AccountType, Person, UNASSIGNED_ID};
