use serde::{Deserialize, Serialize};

use crate::{action::ActionResult, simulation::GardenSnapshot};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Ping {
        #[serde(default)]
        nonce: Option<String>,
    },
    GetState,
    /// Action names stay strings on the wire so unknown ones reach the
    /// simulation and fail there instead of failing to deserialize.
    Dispatch {
        action: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DaemonMessage {
    Hello {
        version: String,
        actions: Vec<String>,
    },
    Pong {
        nonce: Option<String>,
    },
    State {
        snapshot: GardenSnapshot,
    },
    ActionResult {
        action: String,
        result: ActionResult,
    },
    Error {
        message: String,
    },
    Log {
        level: String,
        message: String,
        timestamp: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_use_type_tags() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"dispatch","action":"feed"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Dispatch { action } if action == "feed"));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"get_state"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::GetState));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping { nonce: None }));
    }

    #[test]
    fn action_result_frame_shape() {
        let frame = DaemonMessage::ActionResult {
            action: "feed".into(),
            result: ActionResult::accepted("yum"),
        };
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["type"], "action_result");
        assert_eq!(value["action"], "feed");
        assert_eq!(value["result"]["accepted"], true);
    }
}
