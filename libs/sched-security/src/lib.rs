#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod constants;
pub mod principal;
pub mod subject;

pub use principal::{KerberosPrincipal, PrincipalParseError};
pub use subject::{Subject, SubjectBuilder};
