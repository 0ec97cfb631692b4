mod check;
mod types;

pub use self::check::{check_domain, check_user};
pub use self::types::*;
