//! Rich-text segmentation — splitting an expanded string on
//! `[@operator: arg1: arg2]` markers into actionable chat segments.
//!
//! Unlike placeholder resolution, malformed markup here is an authoring
//! bug in source data and fails the whole call.

use langpack_core::LangpackError;

/// One unit of output text, optionally carrying a click/hover action.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub action: Option<SegmentAction>,
}

impl Segment {
    fn plain(text: String) -> Self {
        Self { text, action: None }
    }
}

/// What happens when the client interacts with a segment.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentAction {
    /// Run a command when the segment is clicked.
    RunCommand { command: String },
    /// Show text when the segment is hovered.
    HoverText { text: String },
}

/// Split `input` into plain and actioned segments.
///
/// Empty segments are dropped, so `"hi [@command: /x: go] bye"` yields
/// exactly three. Any malformed marker aborts with
/// [`LangpackError::Markup`] — no partial output.
pub fn segment(input: &str) -> Result<Vec<Segment>, LangpackError> {
    let chars: Vec<char> = input.chars().collect();
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut index = 0;
    while index < chars.len() {
        let current = chars[index];
        let next = chars.get(index + 1).copied();
        if current == '[' && next == Some('@') {
            if !text.is_empty() {
                segments.push(Segment::plain(std::mem::take(&mut text)));
            }
            index += 2;
            let (marker, consumed) = parse_marker(&chars[index..], input)?;
            segments.push(marker);
            index += consumed;
            continue;
        }
        text.push(current);
        index += 1;
    }
    if !text.is_empty() {
        segments.push(Segment::plain(text));
    }
    Ok(segments)
}

/// Parse one marker starting just past `[@`: the operator up to the first
/// `:`, then `:`-delimited arguments until `]`. Returns the segment and how
/// many chars were consumed (including the closing `]`).
fn parse_marker(chars: &[char], line: &str) -> Result<(Segment, usize), LangpackError> {
    let mut operator = String::new();
    let mut args: Vec<String> = Vec::new();
    let mut buf = String::new();
    let mut in_operator = true;
    let mut index = 0;
    while index < chars.len() {
        let c = chars[index];
        index += 1;
        match c {
            ']' => {
                if in_operator {
                    return Err(LangpackError::Markup(format!(
                        "marker closed before its operator in line: {line}"
                    )));
                }
                args.push(buf);
                return Ok((action_segment(&operator, &args)?, index));
            }
            ':' if in_operator => {
                operator = std::mem::take(&mut buf);
                in_operator = false;
            }
            ':' => {
                args.push(std::mem::take(&mut buf));
            }
            _ => buf.push(c),
        }
    }
    Err(LangpackError::Markup(format!(
        "unterminated marker in line: {line}"
    )))
}

/// Build the actioned segment for a completed marker.
///
/// The display text is the second argument; the action wraps the first.
fn action_segment(operator: &str, args: &[String]) -> Result<Segment, LangpackError> {
    let operator = operator.trim().to_lowercase();
    let args: Vec<&str> = args.iter().map(|a| a.trim()).collect();
    match operator.as_str() {
        "command" => {
            require_args(&operator, &args, 2)?;
            Ok(Segment {
                text: args[1].to_string(),
                action: Some(SegmentAction::RunCommand {
                    command: args[0].to_string(),
                }),
            })
        }
        "hover" => {
            require_args(&operator, &args, 2)?;
            // TODO: emit HoverText once the client protocol's hover display
            // is confirmed; clicking is the only wired action today.
            Ok(Segment {
                text: args[1].to_string(),
                action: Some(SegmentAction::RunCommand {
                    command: args[0].to_string(),
                }),
            })
        }
        _ => Err(LangpackError::Markup(format!(
            "unknown marker operator '@{operator}'"
        ))),
    }
}

fn require_args(operator: &str, args: &[&str], expected: usize) -> Result<(), LangpackError> {
    if args.len() != expected {
        return Err(LangpackError::Markup(format!(
            "the '@{operator}' marker takes {expected} arguments ({} provided)",
            args.len()
        )));
    }
    Ok(())
}
