use serde::{Deserialize, Serialize};

/// Remote action on a financed device held by a repair center.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceAction {
    Lock,
    Release,
}

impl DeviceAction {
    pub fn label(&self) -> &'static str {
        match self {
            DeviceAction::Lock => "Lock device",
            DeviceAction::Release => "Release device",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeviceActionRequest {
    pub action: DeviceAction,
}
