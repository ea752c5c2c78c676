use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Merchant profile as shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Merchant {
    pub id: Uuid,
    /// Used in generated offer titles
    pub display_name: String,
}
