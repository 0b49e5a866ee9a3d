pub mod catalogs;
pub mod error;
pub mod parser;
pub mod report;
pub mod types;
pub mod units;
pub mod validator;

pub use error::{Error, Result};
pub use parser::{parse_string, read_settings};
pub use report::{estimate, render};
pub use types::*;
pub use units::{to_byte_count, to_human_unit};
pub use validator::{missing_settings, validate};
