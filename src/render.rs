//! Text rendering of a roll call's response lists.
//!
//! The layout is what chat members see, so it is fixed:
//!
//! ```text
//! Title
//! 1. In person (reason)
//!
//! Out
//!  - Out person
//!
//! Maybe
//!  - Maybe person
//! ```

use crate::domain::{ResponseKind, RollCall, RollCallResponse};

/// Render the title followed by the in, out, and maybe lists.
#[must_use]
pub fn render_roll_call(roll_call: &RollCall) -> String {
    let mut text = roll_call.title.clone();

    if !roll_call.r#in.is_empty() && !text.is_empty() {
        text.push('\n');
    }
    let numbered: Vec<String> = roll_call
        .r#in
        .iter()
        .enumerate()
        .map(|(i, response)| entry_line(&format!("{}. ", i + 1), response))
        .collect();
    text.push_str(&numbered.join("\n"));

    append_section(&mut text, roll_call, ResponseKind::Out);
    append_section(&mut text, roll_call, ResponseKind::Maybe);

    text
}

/// Append a headed bullet list; empty lists add nothing.
fn append_section(text: &mut String, roll_call: &RollCall, kind: ResponseKind) {
    let responses = roll_call.responses(kind);
    if responses.is_empty() {
        return;
    }
    if !text.is_empty() {
        text.push_str("\n\n");
    }
    text.push_str(kind.label());
    text.push('\n');

    let bullets: Vec<String> = responses
        .iter()
        .map(|response| entry_line(" - ", response))
        .collect();
    text.push_str(&bullets.join("\n"));
}

fn entry_line(prefix: &str, response: &RollCallResponse) -> String {
    if response.reason.is_empty() {
        format!("{prefix}{}", response.name)
    } else {
        format!("{prefix}{} ({})", response.name, response.reason)
    }
}
