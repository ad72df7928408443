//! Word-processor (.docx) reader

use crate::error::ExtractError;
use docx_rs::read_docx;
use serde_json::Value;

/// Paragraph text in document order, non-empty paragraphs joined by one space
///
/// Only top-level body paragraphs are read; table cells are not paragraphs of
/// the body and are skipped.
pub(crate) fn extract(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = read_docx(bytes)
        .map_err(|e| ExtractError::Malformed(format!("Word document parsing error: {}", e)))?;

    let json: Value = serde_json::from_str(&docx.json())
        .map_err(|e| ExtractError::Malformed(format!("Word document JSON error: {}", e)))?;

    let children = json
        .get("document")
        .and_then(|document| document.get("children"))
        .and_then(Value::as_array)
        .ok_or_else(|| ExtractError::Malformed("Word document has no body".to_string()))?;

    let paragraphs: Vec<String> = children
        .iter()
        .filter(|child| node_type(child) == Some("paragraph"))
        .map(|paragraph| {
            let mut text = String::new();
            collect_text(paragraph, &mut text);
            text.trim().to_string()
        })
        .filter(|text| !text.is_empty())
        .collect();

    Ok(paragraphs.join(" "))
}

fn node_type(node: &Value) -> Option<&str> {
    node.get("type").and_then(Value::as_str)
}

/// Append every text run below `node` (runs, hyperlinks, insertions) in order
fn collect_text(node: &Value, out: &mut String) {
    let data = match node.get("data") {
        Some(data) => data,
        None => return,
    };

    match node_type(node) {
        Some("text") => {
            if let Some(text) = data.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
        Some("tab") => out.push('\t'),
        _ => {
            if let Some(children) = data.get("children").and_then(Value::as_array) {
                for child in children {
                    collect_text(child, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use std::io::Cursor;

    fn build_docx(paragraphs: &[&[&str]]) -> Vec<u8> {
        let mut docx = Docx::new();
        for runs in paragraphs {
            let mut paragraph = Paragraph::new();
            for run in runs.iter() {
                paragraph = paragraph.add_run(Run::new().add_text(*run));
            }
            docx = docx.add_paragraph(paragraph);
        }

        let mut buf = Cursor::new(Vec::new());
        docx.build().pack(&mut buf).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_paragraphs_joined_by_space() {
        let bytes = build_docx(&[&["First paragraph."], &["Second paragraph."]]);
        assert_eq!(extract(&bytes).unwrap(), "First paragraph. Second paragraph.");
    }

    #[test]
    fn test_runs_concatenate_within_paragraph() {
        let bytes = build_docx(&[&["Split ", "across ", "runs."]]);
        assert_eq!(extract(&bytes).unwrap(), "Split across runs.");
    }

    #[test]
    fn test_empty_paragraphs_skipped() {
        let bytes = build_docx(&[&["One."], &[], &["Two."]]);
        assert_eq!(extract(&bytes).unwrap(), "One. Two.");
    }

    #[test]
    fn test_not_a_docx() {
        let result = extract(b"plain bytes");
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }
}
