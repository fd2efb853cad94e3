//! Core roll call types: commands, users, roll calls, and replies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Chat identifier as delivered by the chat platform.
pub type ChatId = i64;

/// User identifier as delivered by the chat platform.
pub type UserId = i64;

/// The person who sent a command.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
}

/// A parsed bot command, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub chat_id: ChatId,
    pub name: String,
    #[serde(default)]
    pub params: Vec<String>,
    pub from: User,
}

impl Command {
    /// Params joined by single spaces, used as a title or a reason.
    #[must_use]
    pub fn params_string(&self) -> String {
        self.params.join(" ")
    }
}

/// Which list a response lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    In,
    Out,
    Maybe,
}

impl ResponseKind {
    /// Command keyword for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Maybe => "maybe",
        }
    }

    /// Section header shown above the list.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
            Self::Maybe => "Maybe",
        }
    }
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One participant's answer to a roll call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollCallResponse {
    pub chat_id: ChatId,
    pub user_id: UserId,
    /// Display name captured when the response was recorded.
    pub name: String,
    pub response: ResponseKind,
    #[serde(default)]
    pub reason: String,
}

/// The active roll call for a chat.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RollCall {
    pub chat_id: ChatId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub quiet: bool,
    #[serde(default)]
    pub r#in: Vec<RollCallResponse>,
    #[serde(default)]
    pub out: Vec<RollCallResponse>,
    #[serde(default)]
    pub maybe: Vec<RollCallResponse>,
}

impl RollCall {
    #[must_use]
    pub fn new(chat_id: ChatId, title: impl Into<String>) -> Self {
        Self {
            chat_id,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Responses recorded under `kind`, in arrival order.
    #[must_use]
    pub fn responses(&self, kind: ResponseKind) -> &[RollCallResponse] {
        match kind {
            ResponseKind::In => &self.r#in,
            ResponseKind::Out => &self.out,
            ResponseKind::Maybe => &self.maybe,
        }
    }

    /// Append a response to the list matching its kind.
    ///
    /// Entries are never replaced: a user answering twice shows up twice.
    pub fn record(&mut self, response: RollCallResponse) {
        let list = match response.response {
            ResponseKind::In => &mut self.r#in,
            ResponseKind::Out => &mut self.out,
            ResponseKind::Maybe => &mut self.maybe,
        };
        list.push(response);
    }
}

/// Outbound reply for the transport to deliver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub chat_id: ChatId,
    pub text: String,
}

impl Response {
    #[must_use]
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
        }
    }
}

/// Turn a chat message into a bot command.
///
/// Returns `None` for plain chatter, a bare `/`, or a command addressed to a
/// different bot via `/name@otherbot`.
#[must_use]
pub fn parse_message(text: &str, chat_id: ChatId, from: User, bot_name: &str) -> Option<Command> {
    let mut tokens = text.split_whitespace();
    let head = tokens.next()?.strip_prefix('/')?;

    let name = match head.split_once('@') {
        Some((name, mention)) => {
            if !mention.eq_ignore_ascii_case(bot_name) {
                return None;
            }
            name
        }
        None => head,
    };
    if name.is_empty() {
        return None;
    }

    Some(Command {
        chat_id,
        name: name.to_string(),
        params: tokens.map(str::to_string).collect(),
        from,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn john() -> User {
        User {
            user_id: 456,
            username: "JohnSmith".to_string(),
        }
    }

    fn response(name: &str, kind: ResponseKind) -> RollCallResponse {
        RollCallResponse {
            chat_id: 1,
            user_id: 7,
            name: name.to_string(),
            response: kind,
            reason: String::new(),
        }
    }

    #[test]
    fn params_string_joins_with_single_spaces() {
        let cmd = Command {
            chat_id: 1,
            name: "in".to_string(),
            params: vec!["running".to_string(), "late".to_string()],
            from: john(),
        };
        assert_eq!(cmd.params_string(), "running late");
    }

    #[test]
    fn params_string_empty_when_no_params() {
        let cmd = Command {
            chat_id: 1,
            name: "in".to_string(),
            params: vec![],
            from: john(),
        };
        assert_eq!(cmd.params_string(), "");
    }

    #[test]
    fn record_appends_to_matching_list_only() {
        let mut rc = RollCall::new(1, "Lunch");
        rc.record(response("a", ResponseKind::In));
        rc.record(response("b", ResponseKind::Out));
        rc.record(response("c", ResponseKind::In));

        let names: Vec<_> = rc.r#in.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(rc.out.len(), 1);
        assert!(rc.maybe.is_empty());
    }

    #[test]
    fn record_keeps_duplicates() {
        let mut rc = RollCall::new(1, "");
        rc.record(response("a", ResponseKind::Maybe));
        rc.record(response("a", ResponseKind::Maybe));
        assert_eq!(rc.responses(ResponseKind::Maybe).len(), 2);
    }

    #[test]
    fn response_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ResponseKind::Maybe).unwrap();
        assert_eq!(json, "\"maybe\"");
        assert_eq!(ResponseKind::Out.label(), "Out");
        assert_eq!(ResponseKind::In.to_string(), "in");
    }

    #[test]
    fn parse_plain_command() {
        let cmd = parse_message("/in running late", 5, john(), "whosinbot").unwrap();
        assert_eq!(cmd.chat_id, 5);
        assert_eq!(cmd.name, "in");
        assert_eq!(cmd.params, vec!["running", "late"]);
        assert_eq!(cmd.from, john());
    }

    #[test]
    fn parse_collapses_extra_whitespace() {
        let cmd = parse_message("  /start_roll_call   Friday    drinks ", 5, john(), "bot").unwrap();
        assert_eq!(cmd.name, "start_roll_call");
        assert_eq!(cmd.params_string(), "Friday drinks");
    }

    #[test]
    fn parse_strips_own_mention() {
        let cmd = parse_message("/whos_in@WhosInBot", 5, john(), "whosinbot").unwrap();
        assert_eq!(cmd.name, "whos_in");
        assert!(cmd.params.is_empty());
    }

    #[test]
    fn parse_ignores_other_bots() {
        assert!(parse_message("/in@someotherbot", 5, john(), "whosinbot").is_none());
    }

    #[test]
    fn parse_ignores_chatter() {
        assert!(parse_message("hello /in", 5, john(), "whosinbot").is_none());
        assert!(parse_message("", 5, john(), "whosinbot").is_none());
        assert!(parse_message("/", 5, john(), "whosinbot").is_none());
    }
}
