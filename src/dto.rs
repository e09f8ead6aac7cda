use axum_typed_multipart::{FieldData, TryFromMultipart};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::config::OutputConfig;

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<OutputConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Fields posted by the convert form. Values stay raw strings until parsed.
#[derive(TryFromMultipart, Default)]
pub struct ConvertSubmission {
    #[form_data(field_name = "input-file", limit = "1GiB")]
    pub input_file: Option<FieldData<NamedTempFile>>,

    pub format: Option<String>,

    #[form_data(field_name = "wav-bit-depth")]
    pub wav_bit_depth: Option<String>,

    #[form_data(field_name = "mp3-bit-rate-mode")]
    pub mp3_bit_rate_mode: Option<String>,
    #[form_data(field_name = "mp3-channel-mode")]
    pub mp3_channel_mode: Option<String>,
    #[form_data(field_name = "mp3-vbr-quality")]
    pub mp3_vbr_quality: Option<String>,
    #[form_data(field_name = "mp3-bit-rate")]
    pub mp3_bit_rate: Option<String>,
    #[form_data(field_name = "mp3-use-quality")]
    pub mp3_use_quality: Option<String>,
    #[form_data(field_name = "mp3-quality")]
    pub mp3_quality: Option<String>,
}
