//! Command implementations

pub mod combine;
pub mod common;
pub mod gen_sql;
pub mod run;
