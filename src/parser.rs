use axum_typed_multipart::{FieldData, FieldMetadata};
use http::Uri;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::catalog::{BitDepth, BitRateMode, ChannelMode, Format};
use crate::config::{Mp3BitRate, Mp3Config, OutputConfig, WavConfig};
use crate::dto::ConvertSubmission;
use crate::error::FormError;

/// Input format requested by the client: the last segment of the submission path.
/// The form points its action at the uploaded file's extension.
pub fn extract_format(uri: &Uri) -> &str {
    let path = uri.path().trim_end_matches('/');
    path.rsplit('/').next().unwrap_or_default()
}

impl ConvertSubmission {
    /// Takes the uploaded input file out of the submission.
    pub fn extract_file(&mut self) -> Result<(NamedTempFile, FieldMetadata), FormError> {
        let FieldData { metadata, contents } =
            self.input_file.take().ok_or(FormError::MissingFile)?;
        Ok((contents, metadata))
    }

    /// Parses the output format and its options into an [`OutputConfig`].
    pub fn parse(&self) -> Result<OutputConfig, FormError> {
        let format = self.format.as_deref().unwrap_or_default();
        match format.parse::<Format>()? {
            Format::Wav => self.parse_wav_config().map(OutputConfig::Wav),
            Format::Mp3 => self.parse_mp3_config().map(OutputConfig::Mp3),
        }
    }

    fn parse_wav_config(&self) -> Result<WavConfig, FormError> {
        let bit_depth = parse_int_value(self.wav_bit_depth.as_deref(), "bit depth")?;
        Ok(WavConfig {
            bit_depth: BitDepth(bit_depth),
        })
    }

    fn parse_mp3_config(&self) -> Result<Mp3Config, FormError> {
        let mode = BitRateMode(parse_int_value(
            self.mp3_bit_rate_mode.as_deref(),
            "bit rate mode",
        )?);
        let channel_mode = ChannelMode(parse_int_value(
            self.mp3_channel_mode.as_deref(),
            "channel mode",
        )?);

        let bit_rate = if mode == BitRateMode::VBR {
            Mp3BitRate::Variable {
                vbr_quality: parse_int_value(self.mp3_vbr_quality.as_deref(), "vbr quality")?,
            }
        } else {
            Mp3BitRate::Fixed {
                mode,
                bit_rate: parse_int_value(self.mp3_bit_rate.as_deref(), "bit rate")?,
            }
        };

        // Optional encoder quality: an empty or malformed value is dropped, never fatal.
        let quality = match self.mp3_use_quality.as_deref() {
            Some("true") => self
                .mp3_quality
                .as_deref()
                .and_then(|raw| raw.parse::<i64>().ok()),
            _ => None,
        };

        let config = Mp3Config {
            channel_mode,
            bit_rate,
            quality,
        };
        debug!("parsed mp3 config with bit rate mode {}", config.bit_rate_mode().0);
        Ok(config)
    }
}

/// Parses a required integer form value. `label` names the field in error messages.
fn parse_int_value(value: Option<&str>, label: &'static str) -> Result<i64, FormError> {
    let raw = match value {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(FormError::MissingField(label)),
    };

    raw.parse::<i64>()
        .map_err(|source| FormError::MalformedInteger {
            label,
            value: raw.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav(bit_depth: &str) -> ConvertSubmission {
        ConvertSubmission {
            format: Some("wav".to_string()),
            wav_bit_depth: Some(bit_depth.to_string()),
            ..Default::default()
        }
    }

    fn mp3(mode: BitRateMode, channel_mode: &str) -> ConvertSubmission {
        ConvertSubmission {
            format: Some("mp3".to_string()),
            mp3_bit_rate_mode: Some(mode.0.to_string()),
            mp3_channel_mode: Some(channel_mode.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn extracts_trailing_path_segment() {
        let uri: Uri = "/convert/mp3".parse().unwrap();
        assert_eq!(extract_format(&uri), "mp3");

        let uri: Uri = "/wav/?debug=1".parse().unwrap();
        assert_eq!(extract_format(&uri), "wav");
    }

    #[test]
    fn extract_format_does_not_validate() {
        let uri: Uri = "/ogg".parse().unwrap();
        assert_eq!(extract_format(&uri), "ogg");
    }

    #[test]
    fn missing_file_is_reported() {
        let mut submission = wav("16");
        let Err(err) = submission.extract_file() else {
            panic!("expected missing file error");
        };
        assert!(matches!(err, FormError::MissingFile));
        assert_eq!(err.to_string(), "missing input file");
    }

    #[test]
    fn parses_wav_config() {
        let config = wav("16").parse().unwrap();
        assert_eq!(
            config,
            OutputConfig::Wav(WavConfig {
                bit_depth: BitDepth(16)
            })
        );
    }

    #[test]
    fn wav_bit_depth_is_required() {
        let err = wav("").parse().unwrap_err();
        assert_eq!(err.to_string(), "please provide bit depth");

        let submission = ConvertSubmission {
            format: Some("wav".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            submission.parse(),
            Err(FormError::MissingField("bit depth"))
        ));
    }

    #[test]
    fn wav_bit_depth_must_be_integer() {
        let err = wav("sixteen").parse().unwrap_err();
        assert!(matches!(
            err,
            FormError::MalformedInteger {
                label: "bit depth",
                ..
            }
        ));
        assert!(err
            .to_string()
            .starts_with("failed parsing bit depth sixteen: "));
    }

    #[test]
    fn parses_mp3_vbr_config() {
        let mut submission = mp3(BitRateMode::VBR, "1");
        submission.mp3_vbr_quality = Some("5".to_string());

        let config = submission.parse().unwrap();
        assert_eq!(
            config,
            OutputConfig::Mp3(Mp3Config {
                channel_mode: ChannelMode(1),
                bit_rate: Mp3BitRate::Variable { vbr_quality: 5 },
                quality: None,
            })
        );
    }

    #[test]
    fn vbr_ignores_bit_rate() {
        let mut submission = mp3(BitRateMode::VBR, "0");
        submission.mp3_vbr_quality = Some("2".to_string());
        submission.mp3_bit_rate = Some("not a number".to_string());

        assert!(submission.parse().is_ok());
    }

    #[test]
    fn vbr_requires_quality() {
        let err = mp3(BitRateMode::VBR, "0").parse().unwrap_err();
        assert_eq!(err.to_string(), "please provide vbr quality");
    }

    #[test]
    fn parses_mp3_fixed_rate_config() {
        for mode in [BitRateMode::ABR, BitRateMode::CBR] {
            let mut submission = mp3(mode, "3");
            submission.mp3_bit_rate = Some("320".to_string());

            let config = submission.parse().unwrap();
            assert_eq!(
                config,
                OutputConfig::Mp3(Mp3Config {
                    channel_mode: ChannelMode::MONO,
                    bit_rate: Mp3BitRate::Fixed {
                        mode,
                        bit_rate: 320
                    },
                    quality: None,
                })
            );
        }
    }

    #[test]
    fn fixed_rate_ignores_vbr_quality() {
        let mut submission = mp3(BitRateMode::CBR, "0");
        submission.mp3_bit_rate = Some("128".to_string());
        submission.mp3_vbr_quality = Some("x".to_string());

        assert!(submission.parse().is_ok());
    }

    #[test]
    fn cbr_requires_bit_rate() {
        let err = mp3(BitRateMode::CBR, "0").parse().unwrap_err();
        assert_eq!(err.to_string(), "please provide bit rate");
    }

    #[test]
    fn unknown_bit_rate_mode_is_treated_as_fixed() {
        let mut submission = mp3(BitRateMode(7), "0");
        submission.mp3_bit_rate = Some("64".to_string());

        let OutputConfig::Mp3(config) = submission.parse().unwrap() else {
            panic!("expected mp3 config");
        };
        assert_eq!(config.bit_rate_mode(), BitRateMode(7));
    }

    #[test]
    fn mp3_mode_fields_are_required_and_numeric() {
        let submission = ConvertSubmission {
            format: Some("mp3".to_string()),
            ..Default::default()
        };
        assert_eq!(
            submission.parse().unwrap_err().to_string(),
            "please provide bit rate mode"
        );

        let submission = ConvertSubmission {
            format: Some("mp3".to_string()),
            mp3_bit_rate_mode: Some("2".to_string()),
            ..Default::default()
        };
        assert_eq!(
            submission.parse().unwrap_err().to_string(),
            "please provide channel mode"
        );

        let err = mp3(BitRateMode::CBR, "stereo").parse().unwrap_err();
        assert!(err
            .to_string()
            .starts_with("failed parsing channel mode stereo: "));

        let submission = ConvertSubmission {
            format: Some("mp3".to_string()),
            mp3_bit_rate_mode: Some("vbr".to_string()),
            mp3_channel_mode: Some("0".to_string()),
            ..Default::default()
        };
        assert!(submission
            .parse()
            .unwrap_err()
            .to_string()
            .starts_with("failed parsing bit rate mode vbr: "));
    }

    #[test]
    fn quality_read_only_when_enabled() {
        let mut submission = mp3(BitRateMode::CBR, "0");
        submission.mp3_bit_rate = Some("128".to_string());
        submission.mp3_quality = Some("7".to_string());

        let OutputConfig::Mp3(config) = submission.parse().unwrap() else {
            panic!("expected mp3 config");
        };
        assert_eq!(config.quality, None);

        submission.mp3_use_quality = Some("true".to_string());
        let OutputConfig::Mp3(config) = submission.parse().unwrap() else {
            panic!("expected mp3 config");
        };
        assert_eq!(config.quality, Some(7));
    }

    #[test]
    fn quality_checkbox_without_value_still_parses() {
        for value in [None, Some(""), Some("bogus")] {
            let mut submission = mp3(BitRateMode::CBR, "0");
            submission.mp3_bit_rate = Some("128".to_string());
            submission.mp3_use_quality = Some("true".to_string());
            submission.mp3_quality = value.map(str::to_string);

            let config = submission.parse().unwrap();
            assert_eq!(
                config,
                OutputConfig::Mp3(Mp3Config {
                    channel_mode: ChannelMode::STEREO,
                    bit_rate: Mp3BitRate::Fixed {
                        mode: BitRateMode::CBR,
                        bit_rate: 128
                    },
                    quality: None,
                })
            );
        }
    }

    #[test]
    fn vbr_quality_must_be_integer() {
        let mut submission = mp3(BitRateMode::VBR, "0");
        submission.mp3_vbr_quality = Some("x".to_string());

        let err = submission.parse().unwrap_err();
        assert!(matches!(
            err,
            FormError::MalformedInteger {
                label: "vbr quality",
                ref value,
                ..
            } if value == "x"
        ));
        assert!(err.to_string().starts_with("failed parsing vbr quality x: "));
    }

    #[test]
    fn bit_rate_must_be_integer() {
        let mut submission = mp3(BitRateMode::ABR, "0");
        submission.mp3_bit_rate = Some("abc".to_string());

        let err = submission.parse().unwrap_err();
        assert!(matches!(
            err,
            FormError::MalformedInteger {
                label: "bit rate",
                ref value,
                ..
            } if value == "abc"
        ));
        assert!(err.to_string().starts_with("failed parsing bit rate abc: "));
    }

    #[test]
    fn accepts_values_beyond_32_bits() {
        let mut submission = mp3(BitRateMode::CBR, "0");
        submission.mp3_bit_rate = Some("3000000000".to_string());

        let OutputConfig::Mp3(config) = submission.parse().unwrap() else {
            panic!("expected mp3 config");
        };
        assert_eq!(
            config.bit_rate,
            Mp3BitRate::Fixed {
                mode: BitRateMode::CBR,
                bit_rate: 3_000_000_000
            }
        );
    }

    #[test]
    fn no_range_validation() {
        let mut submission = mp3(BitRateMode::CBR, "0");
        submission.mp3_bit_rate = Some("9000".to_string());
        assert!(submission.parse().is_ok());
    }

    #[test]
    fn rejects_unsupported_format() {
        let submission = ConvertSubmission {
            format: Some("flac".to_string()),
            wav_bit_depth: Some("16".to_string()),
            ..Default::default()
        };
        let err = submission.parse().unwrap_err();
        assert!(matches!(err, FormError::UnsupportedFormat(ref f) if f == "flac"));
        assert_eq!(err.to_string(), "unsupported format: flac");
    }

    #[test]
    fn missing_format_is_unsupported() {
        let err = ConvertSubmission::default().parse().unwrap_err();
        assert_eq!(err.to_string(), "unsupported format: ");
    }
}
