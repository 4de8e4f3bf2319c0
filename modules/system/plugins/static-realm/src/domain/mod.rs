mod client;
pub mod error;
pub mod service;

pub use error::RealmConfigError;
pub use service::StaticRealm;
