//! Code 39 barcodes for snapshots, rendered as inline SVG.
//!
//! The payload is the snapshot's timestamp followed by its name, upper-cased and
//! reduced to `A-Z0-9`. The generator always draws a background `<rect>` first; it is
//! removed so the barcode sits transparently on whatever page embeds it.

use barcoders::generators::svg::{Color, SVG};
use barcoders::sym::code39::Code39;
use thiserror::Error;

use crate::models::snapshot::Snapshot;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

#[derive(Debug, Error, PartialEq)]
pub enum BarcodeError {
    #[error("Nothing to encode: timestamp and name have no characters in A-Z0-9")]
    Empty,
    #[error("Cannot encode barcode: {0}")]
    Encode(#[from] barcoders::error::Error),
}

#[derive(Debug, Clone)]
pub struct BarcodeStyle {
    /// Width in pixels of a narrow bar.
    pub xdim: u32,
    pub height: u32,
    pub foreground: Color,
}

impl Default for BarcodeStyle {
    fn default() -> Self {
        BarcodeStyle {
            xdim: 2,
            height: 50,
            foreground: Color::black(),
        }
    }
}

impl BarcodeStyle {
    fn generator(&self) -> SVG {
        SVG::new(self.height)
            .xdim(self.xdim)
            .foreground(self.foreground)
            .background(Color::new([255, 255, 255, 0]))
            .xmlns(SVG_NAMESPACE.to_string())
    }
}

/// `timestamp` then `name`, upper-cased, with everything outside `A-Z0-9` removed.
pub fn barcode_payload(timestamp: &str, name: &str) -> String {
    format!("{timestamp}{name}")
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

/// Drops the first `<rect .../>` element, which is the generator's background.
fn strip_background(svg: String) -> String {
    let Some(start) = svg.find("<rect") else {
        return svg;
    };
    match svg[start..].find("/>") {
        Some(end) => format!("{}{}", &svg[..start], &svg[start + end + 2..]),
        None => svg,
    }
}

fn generate(modules: &[u8], style: &BarcodeStyle) -> Result<String, BarcodeError> {
    let svg = style.generator().generate(modules)?;
    Ok(strip_background(svg))
}

/// A zero-width barcode, served when a snapshot has nothing to encode.
pub fn blank_svg(style: &BarcodeStyle) -> String {
    generate(&[], style).unwrap_or_default()
}

pub fn render_barcode(
    snapshot: &Snapshot,
    style: &BarcodeStyle,
) -> Result<String, BarcodeError> {
    let payload = barcode_payload(&snapshot.timestamp, &snapshot.name);
    if payload.is_empty() {
        return Err(BarcodeError::Empty);
    }
    let barcode = Code39::new(&payload)?;
    generate(&barcode.encode(), style)
}
