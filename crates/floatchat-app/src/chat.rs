// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;
use tracing::debug;

use crate::MessageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    /// Lightweight markup: `**bold**` spans and `•` bullets, rendered as-is
    /// by plain views.
    pub content: String,
    pub timestamp: OffsetDateTime,
    /// Follow-up prompts; only assistant messages carry them.
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssistantReply {
    pub content: String,
    pub suggestions: Vec<String>,
}

/// Uniform draws in `[0, 1)`. Implementations decide whether the sequence is
/// seeded, scripted or entropy-backed.
pub trait ReplySource {
    fn next_unit(&mut self) -> f64;

    /// Uniform index into a collection of `len` items. `len` must be > 0.
    fn pick_index(&mut self, len: usize) -> usize {
        let unit = self.next_unit().clamp(0.0, 1.0);
        ((unit * len as f64) as usize).min(len.saturating_sub(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatPhase {
    Idle,
    Pending { request_id: RequestId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub request_id: RequestId,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// A reply is still pending; the input was refused.
    Busy,
    Sent(PendingRequest),
}

/// Message list and request state for one chat surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    phase: ChatPhase,
    next_request: u64,
    last_message_id: i64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            phase: ChatPhase::Idle,
            next_request: 0,
            last_message_id: 0,
        }
    }

    /// Session opening with an assistant message already in place.
    pub fn with_greeting(greeting: AssistantReply, now: OffsetDateTime) -> Self {
        let mut session = Self::new();
        session.push(ChatRole::Assistant, greeting, now);
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub const fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self.phase, ChatPhase::Pending { .. })
    }

    pub fn submit(&mut self, input: &str, now: OffsetDateTime) -> SubmitOutcome {
        let query = input.trim();
        if query.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.is_pending() {
            return SubmitOutcome::Busy;
        }

        self.push(
            ChatRole::User,
            AssistantReply {
                content: query.to_owned(),
                suggestions: Vec::new(),
            },
            now,
        );
        self.next_request = self.next_request.saturating_add(1);
        let request_id = RequestId(self.next_request);
        self.phase = ChatPhase::Pending { request_id };
        debug!(request_id = request_id.get(), "chat query submitted");
        SubmitOutcome::Sent(PendingRequest {
            request_id,
            query: query.to_owned(),
        })
    }

    /// Append the reply for `request_id`. Returns false, leaving the session
    /// untouched, when that request is not the pending one.
    pub fn complete(
        &mut self,
        request_id: RequestId,
        reply: AssistantReply,
        now: OffsetDateTime,
    ) -> bool {
        if self.phase != (ChatPhase::Pending { request_id }) {
            debug!(request_id = request_id.get(), "dropping stale reply");
            return false;
        }
        self.push(ChatRole::Assistant, reply, now);
        self.phase = ChatPhase::Idle;
        true
    }

    fn push(&mut self, role: ChatRole, reply: AssistantReply, now: OffsetDateTime) {
        let millis = i64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX);
        let id = millis.max(self.last_message_id.saturating_add(1));
        self.last_message_id = id;
        let suggestions = match role {
            ChatRole::Assistant => reply.suggestions,
            ChatRole::User => Vec::new(),
        };
        self.messages.push(ChatMessage {
            id: MessageId::new(id),
            role,
            content: reply.content,
            timestamp: now,
            suggestions,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::{AssistantReply, ChatPhase, ChatRole, ChatSession, ReplySource, SubmitOutcome};
    use time::macros::datetime;

    struct Fixed(f64);

    impl ReplySource for Fixed {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    fn reply(text: &str) -> AssistantReply {
        AssistantReply {
            content: text.to_owned(),
            suggestions: vec!["next".to_owned()],
        }
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut session = ChatSession::new();
        let now = datetime!(2024-01-15 12:00 UTC);
        assert_eq!(session.submit("   ", now), SubmitOutcome::Ignored);
        assert!(session.messages().is_empty());
        assert_eq!(session.phase(), ChatPhase::Idle);
    }

    #[test]
    fn submit_then_complete_cycles_phase() {
        let mut session = ChatSession::new();
        let now = datetime!(2024-01-15 12:00 UTC);
        let SubmitOutcome::Sent(pending) = session.submit("  salinity?  ", now) else {
            panic!("expected a pending request");
        };
        assert_eq!(pending.query, "salinity?");
        assert!(session.is_pending());
        assert_eq!(session.messages()[0].role, ChatRole::User);
        assert!(session.messages()[0].suggestions.is_empty());

        assert!(session.complete(pending.request_id, reply("answer"), now));
        assert_eq!(session.phase(), ChatPhase::Idle);
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].suggestions, vec!["next".to_owned()]);
    }

    #[test]
    fn second_submit_while_pending_is_refused() {
        let mut session = ChatSession::new();
        let now = datetime!(2024-01-15 12:00 UTC);
        assert!(matches!(session.submit("one", now), SubmitOutcome::Sent(_)));
        assert_eq!(session.submit("two", now), SubmitOutcome::Busy);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn stale_reply_is_dropped() {
        let mut session = ChatSession::new();
        let now = datetime!(2024-01-15 12:00 UTC);
        let SubmitOutcome::Sent(first) = session.submit("one", now) else {
            panic!("expected a pending request");
        };
        assert!(session.complete(first.request_id, reply("a"), now));
        assert!(!session.complete(first.request_id, reply("again"), now));
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn message_ids_strictly_increase_within_one_millisecond() {
        let now = datetime!(2024-01-15 12:00 UTC);
        let mut session = ChatSession::with_greeting(reply("hello"), now);
        let SubmitOutcome::Sent(pending) = session.submit("q", now) else {
            panic!("expected a pending request");
        };
        session.complete(pending.request_id, reply("a"), now);
        let ids: Vec<i64> = session.messages().iter().map(|m| m.id.get()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn pick_index_stays_in_bounds() {
        assert_eq!(Fixed(0.0).pick_index(3), 0);
        assert_eq!(Fixed(0.5).pick_index(3), 1);
        assert_eq!(Fixed(0.999).pick_index(3), 2);
        assert_eq!(Fixed(1.0).pick_index(3), 2);
    }
}
