//! JSON-RPC types for the daemon protocol.

use serde::{Deserialize, Serialize};

use crate::error::{DaemonError, ErrorCode};
use crate::types::{AudioRequest, GeneratedClip};

/// JSON-RPC version constant.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC request ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RequestId {
    Integer(i64),
    String(String),
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Integer(id)
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        RequestId::String(id)
    }
}

/// A JSON-RPC request wrapper.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub id: RequestId,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// A JSON-RPC response wrapper.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub result: T,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(id: RequestId, result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// A JSON-RPC error response.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorResponse {
    pub jsonrpc: &'static str,
    pub id: Option<RequestId>,
    pub error: JsonRpcError,
}

impl JsonRpcErrorResponse {
    pub fn new(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error,
        }
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonRpcErrorData>,
}

/// Extended error data for application-specific errors.
#[derive(Debug, Serialize)]
pub struct JsonRpcErrorData {
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl JsonRpcError {
    /// Creates a parse error (-32700).
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self {
            code: -32700,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an invalid request error (-32600).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
            data: None,
        }
    }

    /// Creates a method not found error (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {}", method),
            data: None,
        }
    }

    /// Creates an invalid params error (-32602).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an internal error (-32603).
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
            data: None,
        }
    }

    /// Creates an application error carrying the daemon error code.
    fn application(code: i32, kind: ErrorCode, details: impl Into<String>) -> Self {
        Self {
            code,
            message: kind.description().to_string(),
            data: Some(JsonRpcErrorData {
                error_code: kind.as_str().to_string(),
                details: Some(details.into()),
            }),
        }
    }

    /// Creates a synthesis error (-32000).
    pub fn synthesis_error(details: impl Into<String>) -> Self {
        Self::application(-32000, ErrorCode::SynthesisError, details)
    }

    /// Creates an invalid format params error (-32001).
    pub fn invalid_format_params(details: impl Into<String>) -> Self {
        Self::application(-32001, ErrorCode::InvalidFormatParams, details)
    }

    /// Creates an encoding consistency error (-32002).
    pub fn encoding_consistency_error(details: impl Into<String>) -> Self {
        Self::application(-32002, ErrorCode::EncodingConsistencyError, details)
    }

    /// Creates an output write failed error (-32003).
    pub fn output_write_failed(details: impl Into<String>) -> Self {
        Self::application(-32003, ErrorCode::OutputWriteFailed, details)
    }
}

impl From<DaemonError> for JsonRpcError {
    fn from(err: DaemonError) -> Self {
        match err.code {
            ErrorCode::SynthesisError => JsonRpcError::synthesis_error(err.message),
            ErrorCode::InvalidFormatParams => JsonRpcError::invalid_format_params(err.message),
            ErrorCode::EncodingConsistencyError => {
                JsonRpcError::encoding_consistency_error(err.message)
            }
            ErrorCode::OutputWriteFailed => JsonRpcError::output_write_failed(err.message),
            ErrorCode::InvalidConfig => JsonRpcError::internal_error(err.message),
        }
    }
}

// ============================================================================
// generate_audio_file
// ============================================================================

/// Parameters for a generate_audio_file request.
#[derive(Debug, Deserialize)]
pub struct GenerateAudioParams {
    /// Tone frequencies in Hz. Empty renders silence.
    #[serde(default)]
    pub frequencies: Vec<f64>,

    /// Clip length in seconds.
    #[serde(alias = "duration_sec")]
    pub duration: f64,

    /// Write the WAV here instead of returning it inline.
    #[serde(default)]
    pub output_path: Option<String>,
}

impl GenerateAudioParams {
    /// Converts the transport parameters into a dispatcher request.
    pub fn to_request(&self) -> AudioRequest {
        AudioRequest::new(self.frequencies.clone(), self.duration)
    }
}

/// Response for a generate_audio_file request.
#[derive(Debug, Serialize)]
pub struct GenerateAudioResult {
    /// Deterministic identifier of this clip.
    pub clip_id: String,

    /// Length of the WAV file in bytes.
    pub byte_len: usize,

    /// Number of stereo frames.
    pub frames: usize,

    /// Audio length in seconds.
    pub duration_sec: f32,

    /// Audio sample rate in Hz.
    pub sample_rate: u32,

    /// Interleaved channel count.
    pub channels: u16,

    /// Hex-encoded WAV file, present when no output path was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wav_hex: Option<String>,

    /// Path of the written file, present when an output path was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl GenerateAudioResult {
    /// Builds a result carrying the WAV bytes inline.
    pub fn inline(clip: GeneratedClip) -> Self {
        let mut result = Self::summary(&clip, None);
        result.wav_hex = Some(hex::encode(clip.image.as_bytes()));
        result
    }

    /// Builds a result pointing at a file on disk.
    pub fn written(clip: &GeneratedClip, path: String) -> Self {
        Self::summary(clip, Some(path))
    }

    fn summary(clip: &GeneratedClip, path: Option<String>) -> Self {
        Self {
            clip_id: clip.clip_id.clone(),
            byte_len: clip.image.len(),
            frames: clip.frames,
            duration_sec: clip.duration_sec,
            sample_rate: clip.sample_rate,
            channels: clip.channels,
            wav_hex: None,
            path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_from_int() {
        let id: RequestId = 42.into();
        assert_eq!(id, RequestId::Integer(42));
    }

    #[test]
    fn request_id_from_string() {
        let id: RequestId = "abc".to_string().into();
        assert_eq!(id, RequestId::String("abc".to_string()));
    }

    #[test]
    fn json_rpc_error_codes() {
        assert_eq!(JsonRpcError::parse_error("").code, -32700);
        assert_eq!(JsonRpcError::invalid_request("").code, -32600);
        assert_eq!(JsonRpcError::method_not_found("").code, -32601);
        assert_eq!(JsonRpcError::invalid_params("").code, -32602);
        assert_eq!(JsonRpcError::internal_error("").code, -32603);
        assert_eq!(JsonRpcError::synthesis_error("").code, -32000);
        assert_eq!(JsonRpcError::invalid_format_params("").code, -32001);
        assert_eq!(JsonRpcError::encoding_consistency_error("").code, -32002);
        assert_eq!(JsonRpcError::output_write_failed("").code, -32003);
    }

    #[test]
    fn daemon_error_maps_to_tagged_error() {
        let err: JsonRpcError = DaemonError::invalid_format("sample rate must be positive").into();
        assert_eq!(err.code, -32001);
        let data = err.data.unwrap();
        assert_eq!(data.error_code, "INVALID_FORMAT_PARAMS");
        assert!(data.details.unwrap().contains("sample rate"));
    }

    #[test]
    fn generate_params_parse() {
        let params: GenerateAudioParams = serde_json::from_value(serde_json::json!({
            "frequencies": [440.0, 660.0],
            "duration": 1.5
        }))
        .unwrap();
        assert_eq!(params.frequencies, vec![440.0, 660.0]);
        assert_eq!(params.duration, 1.5);
        assert!(params.output_path.is_none());

        let request = params.to_request();
        assert_eq!(request.duration_sec, 1.5);
    }

    #[test]
    fn generate_params_require_duration() {
        let result: Result<GenerateAudioParams, _> =
            serde_json::from_value(serde_json::json!({ "frequencies": [440.0] }));
        assert!(result.is_err());
    }

    #[test]
    fn generate_params_default_to_silence() {
        let params: GenerateAudioParams =
            serde_json::from_value(serde_json::json!({ "duration_sec": 0.5 })).unwrap();
        assert!(params.frequencies.is_empty());
    }
}
