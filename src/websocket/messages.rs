//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! clients (dashboards) and the ApiPulse server.

use serde::{Deserialize, Serialize};

use crate::telemetry::RequestSample;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to topics for real-time updates
    Subscribe {
        /// List of topics to subscribe to (e.g., "requests./api/users", "requests.*")
        topics: Vec<String>,
    },
    /// Unsubscribe from topics
    Unsubscribe {
        /// List of topics to unsubscribe from
        topics: Vec<String>,
    },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A request sample was ingested
    Request {
        /// Endpoint path template
        endpoint: String,
        /// HTTP method
        method: String,
        /// HTTP status code
        status: u16,
        /// Request duration in milliseconds
        duration_ms: f64,
        /// Timestamp in milliseconds
        timestamp: i64,
        /// Reporting source, if any
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
    /// Subscription confirmed
    Subscribed {
        /// Topics successfully subscribed to
        topics: Vec<String>,
    },
    /// Unsubscription confirmed
    Unsubscribed {
        /// Topics successfully unsubscribed from
        topics: Vec<String>,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
}

/// Internal event for broadcasting through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    /// Topic this event belongs to (e.g., "requests./api/users")
    pub topic: String,
    /// The message to send to subscribers
    pub message: ServerMessage,
}

impl WsEvent {
    /// Create a request event from an ingested sample
    pub fn request(sample: &RequestSample) -> Self {
        Self {
            topic: format!("requests.{}", sample.endpoint),
            message: ServerMessage::Request {
                endpoint: sample.endpoint.clone(),
                method: sample.method.clone(),
                status: sample.status,
                duration_ms: sample.duration_ms,
                timestamp: sample.timestamp,
                source: sample.source.clone(),
            },
        }
    }

    /// Create a system event
    pub fn system(message: &str) -> Self {
        Self {
            topic: "system".to_string(),
            message: ServerMessage::Error {
                message: message.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_deserialize_subscribe() {
        let json = r#"{"type": "subscribe", "topics": ["requests./api/users", "requests.*"]}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Subscribe { topics } => {
                assert_eq!(topics.len(), 2);
                assert_eq!(topics[0], "requests./api/users");
            }
            _ => panic!("Expected Subscribe"),
        }
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_server_message_serialize_request() {
        let msg = ServerMessage::Request {
            endpoint: "/api/users".to_string(),
            method: "GET".to_string(),
            status: 200,
            duration_ms: 12.5,
            timestamp: 1699000000000,
            source: None,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"request\""));
        assert!(json.contains("\"endpoint\":\"/api/users\""));
        assert!(json.contains("\"status\":200"));
        // None source is omitted entirely
        assert!(!json.contains("source"));
    }

    #[test]
    fn test_server_message_serialize_connected() {
        let msg = ServerMessage::Connected {
            connection_id: "abc-123".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"connection_id\":\"abc-123\""));
    }

    #[test]
    fn test_ws_event_request() {
        let sample = RequestSample::new("/api/users", "GET", 500, 80.0).timestamp(1699000000000);
        let event = WsEvent::request(&sample);
        assert_eq!(event.topic, "requests./api/users");
        match event.message {
            ServerMessage::Request { endpoint, status, .. } => {
                assert_eq!(endpoint, "/api/users");
                assert_eq!(status, 500);
            }
            _ => panic!("Expected Request"),
        }
    }
}
