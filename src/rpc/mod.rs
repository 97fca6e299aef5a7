//! JSON-RPC module for daemon communication.
//!
//! Provides the JSON-RPC 2.0 server implementation for:
//! - `generate_audio_file`: Render tones into a WAV file
//! - `get_format`: Report the fixed output format
//! - `ping`: Health check
//! - `shutdown`: Graceful shutdown

pub mod methods;
pub mod server;
pub mod types;

// Re-export commonly used types
pub use server::{run_server, serve, ServerState};
pub use types::{
    GenerateAudioParams, GenerateAudioResult, JsonRpcError, JsonRpcErrorResponse, JsonRpcRequest,
    JsonRpcResponse, RequestId,
};
