mod client_hints;
mod matcher_config;
mod test_case;

pub use client_hints::*;
pub use matcher_config::*;
pub use test_case::*;
