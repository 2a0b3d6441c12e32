//! WebSocket Message Types
//!
//! Defines all message types exchanged between the dashboard page and the
//! server over the live channel.

use serde::{Deserialize, Serialize};

use crate::chart::Overlay;
use crate::dashboard::params::SineWaveParams;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Partial parameter update; absent fields keep their current value
    SetParams {
        samples: Option<usize>,
        year: Option<i32>,
        cumulative: Option<bool>,
    },
    /// Recompute and resend the chart at the current parameters
    Refresh,
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Session established
    Connected {
        /// Unique session identifier
        session_id: String,
        /// Page title from configuration
        title: String,
        /// Initial parameter values
        params: SineWaveParams,
    },
    /// A freshly composed chart overlay
    Chart {
        /// Increments on every republish within the session
        revision: u64,
        /// Parameters the overlay was computed from
        params: SineWaveParams,
        /// The chart itself
        overlay: Overlay,
    },
    /// A parameter patch was refused
    Rejected {
        /// Why the patch was refused
        message: String,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_params_deserializes_partially() {
        let json = r#"{"type": "set_params", "year": 2009}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::SetParams {
                samples,
                year,
                cumulative,
            } => {
                assert_eq!(year, Some(2009));
                assert_eq!(samples, None);
                assert_eq!(cumulative, None);
            }
            other => panic!("Expected SetParams, got {:?}", other),
        }
    }

    #[test]
    fn test_set_params_full() {
        let json = r#"{"type": "set_params", "samples": 500, "year": 2010, "cumulative": true}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::SetParams {
                samples, cumulative, ..
            } => {
                assert_eq!(samples, Some(500));
                assert_eq!(cumulative, Some(true));
            }
            other => panic!("Expected SetParams, got {:?}", other),
        }
    }

    #[test]
    fn test_ping_and_refresh() {
        let ping: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert!(matches!(ping, ClientMessage::Ping));

        let refresh: ClientMessage = serde_json::from_str(r#"{"type": "refresh"}"#).unwrap();
        assert!(matches!(refresh, ClientMessage::Refresh));
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let result = serde_json::from_str::<ClientMessage>(r#"{"type": "subscribe"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_connected_serializes() {
        let msg = ServerMessage::Connected {
            session_id: "abc-123".to_string(),
            title: "Sinedash".to_string(),
            params: SineWaveParams::new(200, 2017, false).unwrap(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"session_id\":\"abc-123\""));
        assert!(json.contains("\"year\":2017"));
    }

    #[test]
    fn test_rejected_serializes() {
        let msg = ServerMessage::Rejected {
            message: "year must be between 2000 and 2019, got 1900".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"rejected\""));
        assert!(json.contains("1900"));
    }
}
