//! Server push events
//!
//! 数据变更后由服务端广播，客户端据此重新拉取，替代固定间隔轮询。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SettingsChanged,
    GroupsChanged,
    CompaniesChanged,
    TranslationsChanged,
}

impl EventKind {
    /// SSE event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SettingsChanged => "settings_changed",
            Self::GroupsChanged => "groups_changed",
            Self::CompaniesChanged => "companies_changed",
            Self::TranslationsChanged => "translations_changed",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalEvent {
    pub kind: EventKind,
    /// Unix millis
    pub at: i64,
}

impl PortalEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            at: crate::util::now_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&EventKind::GroupsChanged).unwrap();
        assert_eq!(json, "\"groups_changed\"");
        assert_eq!(EventKind::GroupsChanged.to_string(), "groups_changed");
    }
}
