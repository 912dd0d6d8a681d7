use serde::{Deserialize, Serialize};

use super::route::RouteId;
use super::time::TimeOfDay;

crate::define_id_type!(SlotId);

/// One expected flight in the recurring weekly plan. Slots belong to a
/// weekday, not to any specific date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSlot {
    pub id: SlotId,
    pub route_id: RouteId,
    /// Required aircraft type label; `None` means any active aircraft will do.
    #[serde(default)]
    pub ac_type: Option<String>,
    pub dep_time: TimeOfDay,
    #[serde(default)]
    pub expected_pax: Option<u32>,
    #[serde(default)]
    pub notes: String,
}

impl TemplateSlot {
    pub fn new(route_id: RouteId, dep_time: TimeOfDay) -> Self {
        Self {
            id: SlotId::generate(),
            route_id,
            ac_type: None,
            dep_time,
            expected_pax: None,
            notes: String::new(),
        }
    }
}
