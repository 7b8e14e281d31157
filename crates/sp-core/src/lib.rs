//! sp-core - Core library for sqlproof
//!
//! This crate provides the parameter value model shared by the template
//! engine and the test harness, the JSONC decoder used for parameter and
//! suite files, SQL text helpers, test suite loading and database
//! connection configuration.

pub mod connection;
pub mod error;
pub mod jsonc;
pub mod sql_utils;
pub mod suite;
pub mod value;

pub use connection::{
    mask_password, resolve_connection, ConnectionConfig, DbType, ResolvedConnection,
};
pub use error::{CoreError, CoreResult};
pub use jsonc::{decode_params, from_jsonc};
pub use suite::{filter_tests, load_suite, ParamSource, TestCase};
pub use value::{ParameterSet, Value};
