//! Commands accepted over the message channel.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A recognized message-channel command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WorkerMessage {
    /// Activate this version now. The page must reload to pick it up.
    SkipWaiting,
    /// Fetch every resource not yet in the live partition.
    DownloadOffline,
}

impl WorkerMessage {
    /// Wire form of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkipWaiting => "skipWaiting",
            Self::DownloadOffline => "downloadOffline",
        }
    }
}

impl std::fmt::Display for WorkerMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload that is not a known command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown worker message: {0}")]
pub struct UnknownMessage(pub String);

impl FromStr for WorkerMessage {
    type Err = UnknownMessage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skipWaiting" => Ok(Self::SkipWaiting),
            "downloadOffline" => Ok(Self::DownloadOffline),
            other => Err(UnknownMessage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_messages() {
        assert_eq!("skipWaiting".parse::<WorkerMessage>(), Ok(WorkerMessage::SkipWaiting));
        assert_eq!("downloadOffline".parse::<WorkerMessage>(), Ok(WorkerMessage::DownloadOffline));
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("SkipWaiting".parse::<WorkerMessage>().is_err());
        assert!(" skipWaiting".parse::<WorkerMessage>().is_err());
        assert!("".parse::<WorkerMessage>().is_err());
    }

    #[test]
    fn test_display_roundtrips_wire_form() {
        for msg in [WorkerMessage::SkipWaiting, WorkerMessage::DownloadOffline] {
            assert_eq!(msg.to_string().parse::<WorkerMessage>(), Ok(msg));
        }
    }

    #[test]
    fn test_serde_uses_wire_form() {
        let json = serde_json::to_string(&WorkerMessage::DownloadOffline).unwrap();
        assert_eq!(json, r#""downloadOffline""#);

        let msg: WorkerMessage = serde_json::from_str(r#""skipWaiting""#).unwrap();
        assert_eq!(msg, WorkerMessage::SkipWaiting);
    }
}
