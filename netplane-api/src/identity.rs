//! Resource ID generation.

use uuid::Uuid;

/// Generate a new globally-unique resource ID.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
