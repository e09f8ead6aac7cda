use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::FormError;

/// Output formats the convert form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Wav,
    Mp3,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Wav => "wav",
            Format::Mp3 => "mp3",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wav" => Ok(Format::Wav),
            "mp3" => Ok(Format::Mp3),
            other => Err(FormError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BitDepth(pub i64);

impl BitDepth {
    pub const BIT_8: BitDepth = BitDepth(8);
    pub const BIT_16: BitDepth = BitDepth(16);
    pub const BIT_24: BitDepth = BitDepth(24);
    pub const BIT_32: BitDepth = BitDepth(32);
}

/// MP3 bit rate mode code as understood by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BitRateMode(pub i64);

impl BitRateMode {
    pub const VBR: BitRateMode = BitRateMode(0);
    pub const ABR: BitRateMode = BitRateMode(1);
    pub const CBR: BitRateMode = BitRateMode(2);
}

/// MP3 channel mode code as understood by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ChannelMode(pub i64);

impl ChannelMode {
    pub const STEREO: ChannelMode = ChannelMode(0);
    pub const JOINT_STEREO: ChannelMode = ChannelMode(1);
    pub const MONO: ChannelMode = ChannelMode(3);
}

/// Selectable values shown in the convert form.
#[derive(Debug, Clone)]
pub struct OptionsCatalog {
    pub out_formats: Vec<Format>,
    pub wav_bit_depths: BTreeMap<BitDepth, String>,
    pub mp3_bit_rate_modes: BTreeMap<BitRateMode, String>,
    pub mp3_channel_modes: BTreeMap<ChannelMode, String>,
    /// Renders the optional encoder quality input for mp3.
    pub mp3_define_quality: bool,
}

impl OptionsCatalog {
    pub fn supported() -> Self {
        OptionsCatalog {
            out_formats: vec![Format::Wav, Format::Mp3],
            wav_bit_depths: labels([
                (BitDepth::BIT_8, "8 bit"),
                (BitDepth::BIT_16, "16 bit"),
                (BitDepth::BIT_24, "24 bit"),
                (BitDepth::BIT_32, "32 bit"),
            ]),
            mp3_bit_rate_modes: labels([
                (BitRateMode::VBR, "VBR"),
                (BitRateMode::ABR, "ABR"),
                (BitRateMode::CBR, "CBR"),
            ]),
            mp3_channel_modes: labels([
                (ChannelMode::STEREO, "Stereo"),
                (ChannelMode::JOINT_STEREO, "Joint Stereo"),
                (ChannelMode::MONO, "Mono"),
            ]),
            mp3_define_quality: true,
        }
    }

    /// Value for the file input's `accept` attribute, e.g. `.wav, .mp3`.
    pub fn accept(&self) -> String {
        self.out_formats
            .iter()
            .map(|format| format!(".{}", format))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn bit_rate_mode_label(&self, mode: BitRateMode) -> Option<&str> {
        self.mp3_bit_rate_modes.get(&mode).map(String::as_str)
    }
}

fn labels<K: Ord, const N: usize>(entries: [(K, &str); N]) -> BTreeMap<K, String> {
    entries
        .into_iter()
        .map(|(key, label)| (key, label.to_string()))
        .collect()
}
