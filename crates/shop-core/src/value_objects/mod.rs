//! Value objects - immutable types that represent domain concepts

mod password;
mod snowflake;

pub use password::PasswordDigest;
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
