use serde::Serialize;

/// Per-tick counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickStats {
    /// Particles dispatched to the motion solver
    pub processed: u32,
    /// Of those, how many ended the tick in a different cell
    pub moved: u32,
    /// Snapshot entries skipped (dead, or their cell was already processed)
    pub skipped: u32,
    /// Live particles after the tick
    pub live: u32,
}

impl TickStats {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
