//! Prompts sent to the text service

use crate::config::SynthesisKind;
use gleaner_domain::ChatMessage;

/// Fixed assistant framing for every call
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that analyzes interview and \
meeting transcripts and reports concise, concrete insights.";

/// Section labels requested by [`SynthesisKind::Sections`], in presentation order
pub const SECTION_LABELS: [&str; 5] = [
    "Summary",
    "Segments",
    "Pain Points",
    "Opportunities",
    "Insights",
];

/// Messages for one segment
pub fn segment_messages(segment: &str) -> [ChatMessage; 2] {
    [
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Provide insights on the following transcript segment: {}",
            segment
        )),
    ]
}

/// Messages for the cross-document synthesis call
///
/// Guiding questions come before the corpus so a truncated corpus never
/// loses them.
pub fn synthesis_messages(
    kind: SynthesisKind,
    corpus: &str,
    guiding_questions: Option<&str>,
) -> [ChatMessage; 2] {
    let mut content = String::from(instruction(kind));

    if let Some(questions) = guiding_questions.map(str::trim).filter(|q| !q.is_empty()) {
        content.push_str("\n\nPay particular attention to these guiding questions or keywords: ");
        content.push_str(questions);
    }

    content.push_str("\n\n");
    content.push_str(corpus);

    [ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(content)]
}

fn instruction(kind: SynthesisKind) -> String {
    match kind {
        SynthesisKind::Themes => {
            "Identify the common themes and insights across the following transcript insights:"
                .to_string()
        }
        SynthesisKind::Summary => {
            "Write a holistic summary of the following transcript insights:".to_string()
        }
        SynthesisKind::Sections => {
            let labels = SECTION_LABELS
                .iter()
                .map(|label| format!("{}:", label))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "Analyze the following transcript insights. Answer in labeled sections, \
                 each starting on its own line with its label followed by a colon, \
                 using exactly these labels: {}",
                labels
            )
        }
    }
}
