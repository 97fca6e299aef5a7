//! JSON-RPC server over stdin/stdout.
//!
//! Implements the JSON-RPC 2.0 protocol for daemon communication. One
//! request per line in, one response per line out.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info};

use crate::config::DaemonConfig;
use crate::error::Result;
use crate::generation::AudioService;

use super::methods::handle_request;
use super::types::{JsonRpcError, JsonRpcErrorResponse, JsonRpcRequest, JsonRpcResponse};

/// State shared across all request handlers.
pub struct ServerState {
    /// Renders requests into WAV images.
    pub service: AudioService,
    /// Daemon configuration.
    pub config: DaemonConfig,
    /// Flag to signal server shutdown.
    shutdown: AtomicBool,
}

impl ServerState {
    /// Creates new server state with the default synthesizer.
    pub fn new(config: DaemonConfig) -> Result<Self> {
        let service = AudioService::from_config(&config)?;
        Ok(Self::with_service(service, config))
    }

    /// Creates server state around an already constructed service.
    pub fn with_service(service: AudioService, config: DaemonConfig) -> Self {
        Self {
            service,
            config,
            shutdown: AtomicBool::new(false),
        }
    }

    /// Signals the server to shut down.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Returns true if shutdown has been requested.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }
}

/// Runs the JSON-RPC server, reading from stdin and writing to stdout.
pub fn run_server(state: ServerState) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(state, stdin.lock(), stdout.lock())
}

/// Serves line-delimited JSON-RPC requests until EOF or `shutdown`.
pub fn serve<R: BufRead, W: Write>(
    mut state: ServerState,
    reader: R,
    mut writer: W,
) -> Result<()> {
    info!("JSON-RPC server started, waiting for requests...");

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!("Error reading stdin: {}", e);
                break;
            }
        };

        // Skip empty lines
        if line.trim().is_empty() {
            continue;
        }

        let response = process_request(&line, &mut state);

        if let Err(e) = writeln!(writer, "{}", response).and_then(|_| writer.flush()) {
            error!("Error writing response: {}", e);
            break;
        }

        if state.is_shutdown() {
            info!("Server shutdown requested");
            break;
        }
    }

    info!("JSON-RPC server stopped");
    Ok(())
}

/// Processes a single JSON-RPC request line into a response line.
fn process_request(line: &str, state: &mut ServerState) -> String {
    let request: JsonRpcRequest = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            let error = JsonRpcErrorResponse::new(
                None,
                JsonRpcError::parse_error(format!("Invalid JSON: {}", e)),
            );
            return serde_json::to_string(&error).unwrap_or_default();
        }
    };

    if request.jsonrpc != "2.0" {
        let error = JsonRpcErrorResponse::new(
            Some(request.id),
            JsonRpcError::invalid_request("Invalid JSON-RPC version (expected 2.0)"),
        );
        return serde_json::to_string(&error).unwrap_or_default();
    }

    match handle_request(&request.method, request.params, state) {
        Ok(result) => serde_json::to_string(&JsonRpcResponse::new(request.id, result))
            .unwrap_or_default(),
        Err(error) => serde_json::to_string(&JsonRpcErrorResponse::new(Some(request.id), error))
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> DaemonConfig {
        DaemonConfig {
            sample_rate: 8000,
            max_duration_sec: 5.0,
            output_dir: None,
        }
    }

    #[test]
    fn server_state_new() {
        let state = ServerState::new(test_config()).unwrap();
        assert_eq!(state.service.format().sample_rate, 8000);
        assert!(!state.is_shutdown());
    }

    #[test]
    fn server_state_rejects_invalid_config() {
        let config = DaemonConfig {
            sample_rate: 0,
            ..test_config()
        };
        assert!(ServerState::new(config).is_err());
    }

    #[test]
    fn server_state_shutdown() {
        let state = ServerState::new(test_config()).unwrap();
        state.shutdown();
        assert!(state.is_shutdown());
    }

    #[test]
    fn process_invalid_json() {
        let mut state = ServerState::new(test_config()).unwrap();
        let response = process_request("not json", &mut state);
        assert!(response.contains("-32700")); // Parse error
    }

    #[test]
    fn process_invalid_version() {
        let mut state = ServerState::new(test_config()).unwrap();
        let request = r#"{"jsonrpc":"1.0","method":"ping","id":1}"#;
        let response = process_request(request, &mut state);
        assert!(response.contains("-32600")); // Invalid request
    }

    #[test]
    fn process_unknown_method() {
        let mut state = ServerState::new(test_config()).unwrap();
        let request = r#"{"jsonrpc":"2.0","method":"unknown","id":1}"#;
        let response = process_request(request, &mut state);
        assert!(response.contains("-32601")); // Method not found
    }

    #[test]
    fn process_echoes_string_id() {
        let mut state = ServerState::new(test_config()).unwrap();
        let request = r#"{"jsonrpc":"2.0","method":"ping","id":"abc"}"#;
        let response: serde_json::Value =
            serde_json::from_str(&process_request(request, &mut state)).unwrap();
        assert_eq!(response["id"], "abc");
        assert_eq!(response["result"]["status"], "ok");
    }

    #[test]
    fn serve_stops_on_shutdown() {
        let state = ServerState::new(test_config()).unwrap();
        let input = concat!(
            r#"{"jsonrpc":"2.0","method":"ping","id":1}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"shutdown","id":2}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"ping","id":3}"#,
            "\n",
        );
        let mut output = Vec::new();
        serve(state, input.as_bytes(), &mut output).unwrap();

        let lines: Vec<&str> = std::str::from_utf8(&output).unwrap().lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("shutting_down"));
    }
}
