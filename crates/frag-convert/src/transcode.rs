use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use frag_types::registry;

/// Failure inside a concrete transcoder.
///
/// Never escapes the engine: the caller sees a refusal (`None`), not a
/// fault. Kept as a typed enum so failures can be logged with their cause.
#[derive(Debug, Error)]
pub(crate) enum TranscodeError {
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("image: {0}")]
    Image(#[from] image::ImageError),
}

/// A concrete transcoding routine for one `(source, target)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transcoder {
    /// Bytes unchanged, served under the target type.
    Passthrough,
    MarkdownToHtml,
    CsvToJson,
    JsonToYaml,
    YamlToJson,
    ImageReencode(ImageFormat),
}

/// The routine for a `(source, target)` pair, or `None` when no transcoder
/// exists.
///
/// The registry's closure table declares product capability; this table is
/// the implementation inventory. A pair the registry declares that is
/// missing here — currently any image target of `image/avif` — refuses
/// explicitly instead of falling through.
pub(crate) fn transcoder_for(source: &str, target: &str) -> Option<Transcoder> {
    use Transcoder::*;

    let found = match (source, target) {
        ("text/markdown", "text/html") => MarkdownToHtml,
        ("text/csv", "application/json") => CsvToJson,
        ("application/json", "application/yaml") => JsonToYaml,
        ("application/yaml", "application/json") => YamlToJson,
        (
            "text/markdown" | "text/html" | "text/csv" | "application/json" | "application/yaml",
            "text/plain",
        ) => Passthrough,
        _ if registry::IMAGE_TYPES.contains(&source) => match target {
            "image/png" => ImageReencode(ImageFormat::Png),
            "image/jpeg" => ImageReencode(ImageFormat::Jpeg),
            "image/webp" => ImageReencode(ImageFormat::WebP),
            "image/gif" => ImageReencode(ImageFormat::Gif),
            // image/avif: declared in the registry, no encoder yet
            _ => return None,
        },
        _ => return None,
    };
    Some(found)
}

impl Transcoder {
    pub(crate) fn run(&self, input: &[u8]) -> Result<Vec<u8>, TranscodeError> {
        match self {
            Self::Passthrough => Ok(input.to_vec()),
            Self::MarkdownToHtml => markdown_to_html(input),
            Self::CsvToJson => csv_to_json(input),
            Self::JsonToYaml => json_to_yaml(input),
            Self::YamlToJson => yaml_to_json(input),
            Self::ImageReencode(format) => reencode_image(input, *format),
        }
    }
}

fn markdown_to_html(input: &[u8]) -> Result<Vec<u8>, TranscodeError> {
    let source = String::from_utf8(input.to_vec())?;
    let parser = pulldown_cmark::Parser::new(&source);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    Ok(html.into_bytes())
}

/// Header row becomes the key set; every record becomes one JSON object
/// with string values.
fn csv_to_json(input: &[u8]) -> Result<Vec<u8>, TranscodeError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = serde_json::Map::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            row.insert(
                header.to_string(),
                serde_json::Value::String(field.to_string()),
            );
        }
        rows.push(serde_json::Value::Object(row));
    }
    Ok(serde_json::to_vec(&serde_json::Value::Array(rows))?)
}

fn json_to_yaml(input: &[u8]) -> Result<Vec<u8>, TranscodeError> {
    let value: serde_json::Value = serde_json::from_slice(input)?;
    Ok(serde_yaml::to_string(&value)?.into_bytes())
}

fn yaml_to_json(input: &[u8]) -> Result<Vec<u8>, TranscodeError> {
    let value: serde_json::Value = serde_yaml::from_slice(input)?;
    Ok(serde_json::to_vec(&value)?)
}

fn reencode_image(input: &[u8], format: ImageFormat) -> Result<Vec<u8>, TranscodeError> {
    let img = image::load_from_memory(input)?;
    // JPEG has no alpha channel
    let img = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format)?;
    Ok(out.into_inner())
}
