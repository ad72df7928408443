//! Slide deck (.pptx) reader

use crate::error::ExtractError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Shape text in slide order; shapes without text are skipped
///
/// Slides are ordered by the number in their part name (`slide2.xml` before
/// `slide10.xml`). Shape texts and slides are joined by one space.
pub(crate) fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Malformed(format!("Not a slide deck archive: {}", e)))?;

    if archive.by_name(PRESENTATION_PART).is_err() {
        return Err(ExtractError::Malformed(format!(
            "Archive has no {}",
            PRESENTATION_PART
        )));
    }

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| slide_number(name).map(|number| (number, name.to_string())))
        .collect();
    slides.sort_by_key(|(number, _)| *number);

    let mut texts = Vec::new();
    for (_, name) in &slides {
        let mut xml = String::new();
        archive
            .by_name(name)
            .map_err(|e| ExtractError::Malformed(format!("{}: {}", name, e)))?
            .read_to_string(&mut xml)
            .map_err(|e| ExtractError::Malformed(format!("{}: {}", name, e)))?;

        texts.extend(shape_texts(&xml)?);
    }

    Ok(texts.join(" "))
}

/// `ppt/slides/slide7.xml` → 7
fn slide_number(name: &str) -> Option<u32> {
    name.strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

/// Text of every `<p:sp>` shape in one slide, in document order
fn shape_texts(xml: &str) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    let mut shapes = Vec::new();
    let mut current = String::new();
    let mut shape_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"p:sp" => shape_depth += 1,
                b"a:t" => in_text = shape_depth > 0,
                _ => {}
            },
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"a:t" => in_text = false,
                b"a:p" if shape_depth > 0 => {
                    // Paragraph break inside a text frame
                    if !current.is_empty() && !current.ends_with(' ') {
                        current.push(' ');
                    }
                }
                b"p:sp" => {
                    shape_depth = shape_depth.saturating_sub(1);
                    if shape_depth == 0 {
                        let text = current.trim();
                        if !text.is_empty() {
                            shapes.push(text.to_string());
                        }
                        current.clear();
                    }
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| ExtractError::Malformed(format!("Slide XML error: {}", e)))?;
                current.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::Malformed(format!(
                    "Slide XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(shapes)
}
