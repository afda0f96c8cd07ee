//! Test utilities and fixtures for musophile tests.
//!
//! Record fixtures, plus [`CannedServer`] for driving the HTTP clients
//! against a fixed response.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::mock_record;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let record = mock_record("rec-1", "Yesterday");
//!     // ... test logic
//! }
//! ```

use crate::search::domain::MetadataRecord;

/// Creates a fully populated record by The Beatles.
///
/// Customize using struct update syntax:
///
/// ```ignore
/// let custom = MetadataRecord {
///     artist_name: "Someone Else".to_string(),
///     ..mock_record("id", "Title")
/// };
/// ```
pub fn mock_record(id: &str, title: &str) -> MetadataRecord {
    MetadataRecord {
        id: id.to_string(),
        title: title.to_string(),
        artist_name: "The Beatles".to_string(),
        release_title: Some("Help!".to_string()),
        tags: vec!["rock".to_string(), "ballad".to_string()],
    }
}

/// Creates a record with no release and no tags.
pub fn record_without_extras(id: &str, title: &str) -> MetadataRecord {
    MetadataRecord {
        release_title: None,
        tags: Vec::new(),
        ..mock_record(id, title)
    }
}

/// A one-shot local HTTP server answering with a canned response.
pub struct CannedServer {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    request: tokio::task::JoinHandle<String>,
}

impl CannedServer {
    /// Accept one connection and answer it with `status` and a JSON `body`.
    pub async fn respond(status: u16, body: impl Into<String>) -> Self {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let body = body.into();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let request = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            // Read the request head; GETs carry no body
            let mut received = Vec::new();
            let mut chunk = [0u8; 1024];
            while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => received.extend_from_slice(&chunk[..n]),
                }
            }

            let response = format!(
                "HTTP/1.1 {status} Canned\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&received).into_owned()
        });

        Self { base_url, request }
    }

    /// The raw request head the server received.
    pub async fn request(self) -> String {
        self.request.await.unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_record_defaults() {
        let record = mock_record("rec-1", "Yesterday");
        assert_eq!(record.id, "rec-1");
        assert!(record.release_title.is_some());
        assert_eq!(record.tags.len(), 2);
    }

    #[tokio::test]
    async fn test_canned_server_answers_once() {
        let server = CannedServer::respond(200, r#"{"ok":true}"#).await;

        let response = reqwest::get(format!("{}/ping", server.base_url)).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        assert_eq!(response.text().await.unwrap(), r#"{"ok":true}"#);

        assert!(server.request().await.starts_with("GET /ping "));
    }

    #[test]
    fn test_record_without_extras() {
        let record = record_without_extras("rec-2", "Demo");
        assert_eq!(record.title, "Demo");
        assert!(record.release_title.is_none());
        assert!(record.tags.is_empty());
    }
}
