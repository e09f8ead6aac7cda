use std::fmt::Write;

use axum::body::Bytes;
use tracing::debug;

use crate::catalog::{BitRateMode, OptionsCatalog};
use crate::error::RenderError;

const CONVERT_HTML: &str = include_str!("templates/convert.html");

/// The convert page, rendered once from an [`OptionsCatalog`].
#[derive(Debug, Clone)]
pub struct ConvertForm {
    data: Bytes,
}

impl ConvertForm {
    pub fn build(catalog: &OptionsCatalog) -> Result<ConvertForm, RenderError> {
        let mut values = vec![
            ("accept", escape_html(&catalog.accept())),
            ("out_formats", out_formats(catalog)?),
            (
                "wav_bit_depths",
                options(catalog.wav_bit_depths.iter().map(|(k, v)| (k.0, v)))?,
            ),
            (
                "mp3_channel_modes",
                options(catalog.mp3_channel_modes.iter().map(|(k, v)| (k.0, v)))?,
            ),
            ("mp3_bit_rate_modes", bit_rate_modes(catalog)?),
            ("mp3_quality", quality(catalog.mp3_define_quality)),
        ];

        // Class hooks of the rate inputs, keyed by mode label.
        for (mode, key, what) in [
            (BitRateMode::VBR, "mp3_vbr", "VBR bit rate mode"),
            (BitRateMode::ABR, "mp3_abr", "ABR bit rate mode"),
            (BitRateMode::CBR, "mp3_cbr", "CBR bit rate mode"),
        ] {
            let label = catalog
                .bit_rate_mode_label(mode)
                .ok_or(RenderError::MissingOption(what))?;
            values.push((key, escape_html(label)));
        }

        let html = substitute(CONVERT_HTML, &values)?;
        debug!("rendered convert form, {} bytes", html.len());
        Ok(ConvertForm {
            data: Bytes::from(html),
        })
    }

    /// Rendered document, ready to be served.
    pub fn data(&self) -> Bytes {
        self.data.clone()
    }
}

fn out_formats(catalog: &OptionsCatalog) -> Result<String, RenderError> {
    let mut html = String::new();
    for format in &catalog.out_formats {
        writeln!(
            html,
            r#"        <input type="radio" id="{0}" value="{0}" name="format" class="output-formats" onclick="onOutputFormatsClick(this)">"#,
            format
        )?;
        writeln!(html, r#"        <label for="{0}">{0}</label>"#, format)?;
    }
    Ok(html)
}

fn options<'a>(entries: impl Iterator<Item = (i64, &'a String)>) -> Result<String, RenderError> {
    let mut html = String::new();
    for (value, label) in entries {
        writeln!(
            html,
            r#"            <option value="{}">{}</option>"#,
            value,
            escape_html(label)
        )?;
    }
    Ok(html)
}

// Option ids are the hooks `onMp3BitRateModeChange` uses to pick the rate inputs.
fn bit_rate_modes(catalog: &OptionsCatalog) -> Result<String, RenderError> {
    let mut html = String::new();
    for (mode, label) in &catalog.mp3_bit_rate_modes {
        let label = escape_html(label);
        writeln!(
            html,
            r#"            <option id="{}" value="{}">{}</option>"#,
            label, mode.0, label
        )?;
    }
    Ok(html)
}

fn quality(enabled: bool) -> String {
    if !enabled {
        return String::new();
    }
    r#"        <div id="mp3-quality">
            <input type="checkbox" id="mp3-use-quality" name="mp3-use-quality" value="true" onchange="onMp3UseQualityChange(this)">quality
            <div id="mp3-quality-value" style="display:inline;visibility:hidden">
                [0-10]
                <input type="text" name="mp3-quality" maxlength="2" size="3">
            </div>
            <br>
        </div>"#
        .to_string()
}

/// Replaces every `{{name}}` in `template`. Substituted values are not rescanned.
fn substitute(template: &str, values: &[(&str, String)]) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let end = tail
            .find("}}")
            .ok_or_else(|| RenderError::UnresolvedPlaceholder(tail.chars().take(32).collect()))?;
        let name = &tail[..end];
        let value = values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .ok_or_else(|| RenderError::UnresolvedPlaceholder(name.to_string()))?;
        out.push_str(value);
        rest = &tail[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
