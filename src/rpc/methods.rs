//! JSON-RPC method handlers.
//!
//! Implements the handlers for all supported JSON-RPC methods.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::audio::write_wav;

use super::server::ServerState;
use super::types::{GenerateAudioParams, GenerateAudioResult, JsonRpcError};

/// Handles a JSON-RPC method call.
pub fn handle_request(
    method: &str,
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    match method {
        "generate_audio_file" => handle_generate_audio_file(params, state),
        "get_format" => handle_get_format(state),
        "ping" => handle_ping(),
        "shutdown" => handle_shutdown(state),
        _ => Err(JsonRpcError::method_not_found(method)),
    }
}

/// Handles the ping method for health checks.
fn handle_ping() -> Result<serde_json::Value, JsonRpcError> {
    Ok(serde_json::json!({ "status": "ok" }))
}

/// Handles the shutdown method.
fn handle_shutdown(state: &mut ServerState) -> Result<serde_json::Value, JsonRpcError> {
    state.shutdown();
    Ok(serde_json::json!({ "status": "shutting_down" }))
}

/// Reports the fixed format every clip is written in.
fn handle_get_format(state: &ServerState) -> Result<serde_json::Value, JsonRpcError> {
    to_json(state.service.format())
}

/// Handles the generate_audio_file method.
fn handle_generate_audio_file(
    params: serde_json::Value,
    state: &mut ServerState,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: GenerateAudioParams = serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))?;

    let clip = state
        .service
        .generate_audio_file(&params.to_request())
        .map_err(|e| {
            warn!(code = %e.code, "generate_audio_file failed: {}", e.message);
            JsonRpcError::from(e)
        })?;

    let result = match params.output_path {
        Some(path) => {
            let path = PathBuf::from(path);
            write_wav(&clip.image, &path).map_err(|e| {
                warn!(code = %e.code, "failed to write clip: {}", e.message);
                JsonRpcError::from(e)
            })?;
            info!(clip_id = %clip.clip_id, path = %path.display(), "clip written");
            GenerateAudioResult::written(&clip, path.to_string_lossy().to_string())
        }
        None => GenerateAudioResult::inline(clip),
    };

    to_json(&result)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value)
        .map_err(|e| JsonRpcError::internal_error(format!("Failed to serialize result: {}", e)))
}
