mod cache;
mod config;
mod dispatcher;
mod error;
mod fragment;
mod grammar;
mod parser;
mod types;

pub use config::{AnalyzerConfig, AnalyzerConfigBuilder, DEFAULT_USER_AGENT_MAX_LENGTH};
pub use dispatcher::ClientHintsDispatcher;
pub use error::{Error, Result};
pub use fragment::{ConfigFragment, LookupEntry, LookupSetEntry};
pub use grammar::{parse_sf_boolean, parse_sf_string};
pub use types::*;
