//! Parsing of labeled synthesis replies
//!
//! Sections are found by their labels, never by position, so a reply that
//! reorders, omits or decorates sections still parses.

use crate::prompt::SECTION_LABELS;
use gleaner_domain::ReportSection;

/// Title for text that precedes the first label
pub const PREAMBLE_TITLE: &str = "Overview";

/// Title used when the reply carries no labels at all
pub const UNLABELED_TITLE: &str = "Synthesis";

/// Split a synthesis reply into labeled sections
///
/// A line starts a section when, after markdown decoration (`#`, `*`, `-`,
/// `_`) is stripped, it begins with a known label followed by a colon. The
/// rest of that line and every following line up to the next label form the
/// body. A reply without any label becomes one section.
///
/// # Examples
///
/// ```
/// use gleaner_pipeline::sections::parse_sections;
///
/// let sections = parse_sections("**Summary:** fine\n## Pain Points:\nslow exports");
/// assert_eq!(sections[0].title, "Summary");
/// assert_eq!(sections[0].body, "fine");
/// assert_eq!(sections[1].title, "Pain Points");
/// assert_eq!(sections[1].body, "slow exports");
/// ```
pub fn parse_sections(reply: &str) -> Vec<ReportSection> {
    let mut preamble: Vec<&str> = Vec::new();
    let mut labeled: Vec<(&'static str, Vec<&str>)> = Vec::new();

    for line in reply.lines() {
        if let Some((label, rest)) = match_label(line) {
            let mut body = Vec::new();
            if !rest.is_empty() {
                body.push(rest);
            }
            labeled.push((label, body));
        } else if let Some((_, body)) = labeled.last_mut() {
            body.push(line);
        } else {
            preamble.push(line);
        }
    }

    if labeled.is_empty() {
        return vec![ReportSection::new(UNLABELED_TITLE, reply.trim())];
    }

    let mut sections = Vec::with_capacity(labeled.len() + 1);
    let preamble = preamble.join("\n");
    if !preamble.trim().is_empty() {
        sections.push(ReportSection::new(PREAMBLE_TITLE, preamble.trim()));
    }
    for (label, body) in labeled {
        sections.push(ReportSection::new(label, body.join("\n").trim()));
    }
    sections
}

fn match_label(line: &str) -> Option<(&'static str, &str)> {
    let stripped = line.trim_start_matches(is_decoration);

    SECTION_LABELS.iter().find_map(|label| {
        let head = stripped.get(..label.len())?;
        if !head.eq_ignore_ascii_case(label) {
            return None;
        }
        let rest = stripped[label.len()..].trim_start_matches(['*', '_']);
        let rest = rest.strip_prefix(':')?;
        Some((*label, rest.trim_matches(is_decoration)))
    })
}

fn is_decoration(c: char) -> bool {
    c.is_whitespace() || matches!(c, '#' | '*' | '-' | '_')
}
