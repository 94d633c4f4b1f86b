//! Lifecycle events

use serde::{Deserialize, Serialize};

/// The four lifecycle hooks of a workspace, each an ordered list of command
/// ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Events {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_start: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_start: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pre_stop: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub post_stop: Vec<String>,
}

impl Events {
    pub fn is_empty(&self) -> bool {
        self.pre_start.is_empty()
            && self.post_start.is_empty()
            && self.pre_stop.is_empty()
            && self.post_stop.is_empty()
    }

    /// Iterate over every `(slot name, command ids)` pair.
    pub fn slots(&self) -> [(&'static str, &[String]); 4] {
        [
            ("pre start", self.pre_start.as_slice()),
            ("post start", self.post_start.as_slice()),
            ("pre stop", self.pre_stop.as_slice()),
            ("post stop", self.post_stop.as_slice()),
        ]
    }
}
