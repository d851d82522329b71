mod core;
mod types;

pub use self::core::{FieldIndex, Record};
pub use self::types::Value;
