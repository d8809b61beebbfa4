//! Simulated chat between a customer and a helper.
//!
//! The conversation opens with a canned greeting and a system banner, then a
//! counterpart follow-up after `chat_follow_up`. Each message the viewer
//! sends is echoed immediately and answered by one canned reply after a
//! random delay. Replies wait in the conversation's [`DeferredQueue`] and
//! are appended by [`ViewClock::advance`].

use crate::error::{Error, Result, ValidationError};
use crate::schedule::{DeferredQueue, Timings, ViewClock};
use crate::types::SessionContext;
use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Canned answers to anything the viewer sends.
pub const CANNED_REPLIES: [&str; 5] = [
    "Got it! I'll be there shortly.",
    "Perfect, see you then!",
    "That works for me. Payment can be done after completion.",
    "Thank you for choosing Helper!",
    "I'll bring all necessary tools.",
];

const SYSTEM_BANNER: &str =
    "This is a real-time chat powered by WebSocket. Messages are delivered instantly.";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Customer,
    Helper,
    System,
}

impl Sender {
    /// The side a viewer in `context` writes as.
    pub fn of(context: SessionContext) -> Self {
        match context {
            SessionContext::Customer => Sender::Customer,
            SessionContext::Helper => Sender::Helper,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    System,
}

/// One chat entry. Never modified after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub sender: Sender,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub kind: MessageKind,
}

/// The simulated other party, as shown in the chat header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counterpart {
    pub name: &'static str,
    pub title: &'static str,
    pub status: &'static str,
}

impl Counterpart {
    /// The party a viewer in `viewer` is talking to.
    pub fn facing(viewer: SessionContext) -> Self {
        match viewer {
            SessionContext::Customer => Counterpart {
                name: "Rajesh Kumar",
                title: "Professional Plumber",
                status: "Online",
            },
            SessionContext::Helper => Counterpart {
                name: "Sarah Johnson",
                title: "Client",
                status: "Online",
            },
        }
    }

    fn greeting(viewer: SessionContext) -> &'static str {
        match viewer {
            SessionContext::Customer => "Hi! I'm Rajesh, your plumber. I've accepted your request for plumbing repair. Could you please describe the issue in more detail?",
            SessionContext::Helper => "Hello! I saw your plumbing service request. I need help with a leaking pipe in my kitchen. When would be a good time for you to come over?",
        }
    }

    fn follow_up(viewer: SessionContext) -> &'static str {
        match viewer {
            SessionContext::Customer => "I can come over today between 2-4 PM. My service charge is ₹800 for pipe repair including materials. Is that okay?",
            SessionContext::Helper => "That sounds good. I'm available anytime after 1 PM today. The kitchen sink has been dripping for 2 days now.",
        }
    }
}

/// A mounted chat view.
#[derive(Debug)]
pub struct Conversation<R> {
    id: String,
    viewer: SessionContext,
    opened_at: DateTime<Utc>,
    messages: Vec<Message>,
    pending: DeferredQueue<&'static str>,
    timings: Timings,
    rng: R,
    next_id: u64,
    closed: bool,
}

fn offset(at: DateTime<Utc>, elapsed: Duration) -> DateTime<Utc> {
    at + TimeDelta::from_std(elapsed).unwrap_or_else(|_| TimeDelta::zero())
}

impl<R: Rng> Conversation<R> {
    /// Open conversation `id` for a viewer in `viewer`'s context.
    pub fn open(
        id: impl Into<String>,
        viewer: SessionContext,
        opened_at: DateTime<Utc>,
        timings: Timings,
        rng: R,
    ) -> Self {
        let mut conversation = Self {
            id: id.into(),
            viewer,
            opened_at,
            messages: Vec::new(),
            pending: DeferredQueue::new(),
            timings,
            rng,
            next_id: 1,
            closed: false,
        };

        let other = conversation.counterpart_sender();
        conversation.push(
            other,
            Counterpart::greeting(viewer).to_string(),
            opened_at - TimeDelta::minutes(5),
            MessageKind::Text,
        );
        conversation.push(
            Sender::System,
            SYSTEM_BANNER.to_string(),
            opened_at - TimeDelta::minutes(4),
            MessageKind::System,
        );
        conversation
            .pending
            .schedule(timings.chat_follow_up, Counterpart::follow_up(viewer));

        tracing::debug!(chat_id = %conversation.id, viewer = %viewer, "conversation opened");
        conversation
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn viewer(&self) -> SessionContext {
        self.viewer
    }

    pub fn counterpart(&self) -> Counterpart {
        Counterpart::facing(self.viewer)
    }

    /// Messages in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Replies not yet delivered.
    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn counterpart_sender(&self) -> Sender {
        match self.viewer {
            SessionContext::Customer => Sender::Helper,
            SessionContext::Helper => Sender::Customer,
        }
    }

    fn push(&mut self, sender: Sender, body: String, created_at: DateTime<Utc>, kind: MessageKind) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            sender,
            body,
            created_at,
            kind,
        });
    }

    /// Send `text` as the viewer at elapsed time `now`.
    ///
    /// The trimmed text is appended at once and one canned reply is
    /// scheduled. Blank text is rejected and nothing changes.
    pub fn send(&mut self, text: &str, now: Duration) -> Result<&Message> {
        if self.closed {
            return Err(Error::InvalidTransition {
                from: "the conversation is closed",
                action: "send a message",
            });
        }
        let body = text.trim();
        if body.is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }

        let sender = Sender::of(self.viewer);
        self.push(sender, body.to_string(), offset(self.opened_at, now), MessageKind::Text);

        let delay = self.timings.reply_delay(&mut self.rng);
        let reply = CANNED_REPLIES[self.rng.random_range(0..CANNED_REPLIES.len())];
        self.pending.schedule(now + delay, reply);
        tracing::debug!(
            chat_id = %self.id,
            delay_ms = delay.as_millis() as u64,
            "reply scheduled"
        );

        let last = self.messages.len() - 1;
        Ok(&self.messages[last])
    }

    /// Stop the simulation: pending replies are dropped and never appear.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.pending.cancel_all();
            tracing::debug!(chat_id = %self.id, "conversation closed");
        }
    }
}

impl<R: Rng> ViewClock for Conversation<R> {
    fn next_due(&self) -> Option<Duration> {
        self.pending.next_due()
    }

    fn advance(&mut self, now: Duration) -> usize {
        let due = self.pending.drain_due(now);
        let sender = self.counterpart_sender();
        for (at, body) in &due {
            self.push(
                sender,
                body.to_string(),
                offset(self.opened_at, *at),
                MessageKind::Text,
            );
        }
        due.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn opened_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 9, 30, 0).unwrap()
    }

    fn open(viewer: SessionContext, seed: u64) -> Conversation<StdRng> {
        Conversation::open(
            "abc",
            viewer,
            opened_at(),
            Timings::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_seeded_messages() {
        let chat = open(SessionContext::Customer, 1);
        let messages = chat.messages();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::Helper);
        assert!(messages[0].body.starts_with("Hi! I'm Rajesh"));
        assert_eq!(messages[0].created_at, opened_at() - TimeDelta::minutes(5));
        assert_eq!(messages[1].kind, MessageKind::System);
        assert_eq!(messages[1].created_at, opened_at() - TimeDelta::minutes(4));
        assert_eq!(chat.next_due(), Some(ms(3000)));
        assert_eq!(chat.counterpart().name, "Rajesh Kumar");
    }

    #[test]
    fn test_helper_view_faces_client() {
        let mut chat = open(SessionContext::Helper, 1);
        assert_eq!(chat.messages()[0].sender, Sender::Customer);
        assert_eq!(chat.counterpart().title, "Client");

        chat.advance(ms(3000));
        let follow_up = chat.messages().last().unwrap();
        assert_eq!(follow_up.sender, Sender::Customer);
        assert!(follow_up.body.contains("after 1 PM"));
    }

    #[test]
    fn test_send_echoes_then_one_reply_within_bounds() {
        let mut chat = open(SessionContext::Customer, 42);
        chat.advance(ms(3000));
        let before = chat.messages().len();

        let sent = chat.send("  Hello  ", ms(10_000)).unwrap();
        assert_eq!(sent.body, "Hello");
        assert_eq!(sent.sender, Sender::Customer);
        assert_eq!(chat.messages().len(), before + 1);
        assert_eq!(chat.pending_replies(), 1);

        let due = chat.next_due().unwrap();
        assert!(due >= ms(11_000) && due < ms(13_000), "{due:?}");

        assert_eq!(chat.advance(ms(13_000)), 1);
        let reply = chat.messages().last().unwrap();
        assert_eq!(reply.sender, Sender::Helper);
        assert!(CANNED_REPLIES.contains(&reply.body.as_str()));
        assert_eq!(chat.messages().len(), before + 2);
        assert_eq!(chat.advance(ms(60_000)), 0);
    }

    #[test]
    fn test_blank_message_rejected() {
        let mut chat = open(SessionContext::Customer, 3);
        let err = chat.send(" \t", ms(100)).unwrap_err();
        assert_eq!(err, Error::Validation(ValidationError::EmptyMessage));
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.pending_replies(), 1);
    }

    #[test]
    fn test_ids_increase_and_order_is_kept() {
        let mut chat = open(SessionContext::Customer, 9);
        chat.send("one", ms(100)).unwrap();
        chat.send("two", ms(200)).unwrap();
        chat.advance(ms(10_000));

        let ids: Vec<u64> = chat.messages().iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(chat.messages()[2].body, "one");
        assert_eq!(chat.messages()[3].body, "two");
        assert_eq!(chat.messages().len(), 7);
    }

    #[test]
    fn test_close_cancels_pending() {
        let mut chat = open(SessionContext::Helper, 5);
        chat.send("On my way", ms(500)).unwrap();
        chat.close();

        assert_eq!(chat.pending_replies(), 0);
        assert_eq!(chat.advance(ms(60_000)), 0);
        assert_eq!(chat.messages().len(), 3);
        assert!(chat.send("still there?", ms(61_000)).is_err());
    }

    #[test]
    fn test_reply_timestamp_follows_due_time() {
        let timings = Timings {
            reply_delay_min: ms(1500),
            reply_delay_max: ms(1500),
            ..Timings::default()
        };
        let mut chat = Conversation::open(
            "t",
            SessionContext::Customer,
            opened_at(),
            timings,
            StdRng::seed_from_u64(0),
        );
        chat.send("Hi", ms(100)).unwrap();
        chat.advance(ms(1600));

        let reply = chat.messages().last().unwrap();
        assert_eq!(reply.created_at, opened_at() + TimeDelta::milliseconds(1600));
    }
}
