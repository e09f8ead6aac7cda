use serde::Serialize;

use crate::catalog::{BitDepth, BitRateMode, ChannelMode, Format};

/// Output parameters handed to the conversion engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum OutputConfig {
    Wav(WavConfig),
    Mp3(Mp3Config),
}

impl OutputConfig {
    pub fn format(&self) -> Format {
        match self {
            OutputConfig::Wav(_) => Format::Wav,
            OutputConfig::Mp3(_) => Format::Mp3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WavConfig {
    pub bit_depth: BitDepth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mp3Config {
    pub channel_mode: ChannelMode,
    #[serde(flatten)]
    pub bit_rate: Mp3BitRate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<i64>,
}

impl Mp3Config {
    pub fn bit_rate_mode(&self) -> BitRateMode {
        match self.bit_rate {
            Mp3BitRate::Variable { .. } => BitRateMode::VBR,
            Mp3BitRate::Fixed { mode, .. } => mode,
        }
    }
}

/// VBR is driven by a quality target, every other mode by a bit rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rate", rename_all = "lowercase")]
pub enum Mp3BitRate {
    Variable {
        #[serde(rename = "vbrQuality")]
        vbr_quality: i64,
    },
    Fixed {
        #[serde(rename = "bitRateMode")]
        mode: BitRateMode,
        #[serde(rename = "bitRate")]
        bit_rate: i64,
    },
}
