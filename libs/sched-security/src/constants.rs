//! Well-known identities used when authentication is disabled or stubbed out.

use uuid::Uuid;

/// Subject id assigned to the development identity.
pub const DEFAULT_SUBJECT_ID: Uuid = Uuid::from_u128(0x1111_1111_6a88_4768_9dfc_6bcd_5187_d9ed);

/// Realm used by the development identity.
pub const DEFAULT_REALM: &str = "LOCALDOMAIN";

/// Principal used by the development identity.
pub const DEFAULT_PRINCIPAL: &str = "scheduler@LOCALDOMAIN";

/// Role granted to identities that may perform any scheduler operation.
pub const ROLE_ADMIN: &str = "admin";
