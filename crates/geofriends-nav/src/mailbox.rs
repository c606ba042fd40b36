//! Request bookkeeping for one mover.
//!
//! Requests wait in a FIFO until answered; the other mover answers in
//! arrival order, so an answer must match the oldest pending request.

use std::collections::VecDeque;

use log::{trace, warn};

use crate::protocol::{Answer, Attachment, Command, Message, MessageIds, Request, Verdict};

/// Outbox plus the queue of requests still waiting for an answer.
#[derive(Debug, Default)]
pub struct Mailbox {
    ids: MessageIds,
    pending: VecDeque<Request>,
    outbox: Vec<Message>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request and remember it until answered. Returns its id.
    pub fn send_request(&mut self, command: Command) -> u32 {
        let req = Request {
            id: self.ids.next_id(),
            command,
        };
        trace!("mailbox: sending request {}: {}", req.id, req.command);
        let id = req.id;
        self.outbox.push(Message::Request(req.clone()));
        self.pending.push_back(req);
        id
    }

    /// Queue an answer to `request`.
    pub fn answer(&mut self, request: &Request, verdict: Verdict, attachment: Option<Attachment>) {
        let ans = Answer {
            id: self.ids.next_id(),
            request_id: request.id,
            verdict,
            attachment,
        };
        self.outbox.push(Message::Answer(ans));
    }

    /// Drain the outbox in send order.
    pub fn take_outgoing(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox)
    }

    /// Match `answer` against the oldest pending request.
    ///
    /// On a match the request is fulfilled and returned. Otherwise the
    /// answer is reported missing and the oldest request is sent again; it
    /// stays pending.
    pub fn accept_answer(&mut self, answer: &Answer) -> Option<Request> {
        let Some(oldest) = self.pending.front() else {
            warn!("mailbox: stray answer to request {} with nothing pending", answer.request_id);
            return None;
        };
        if oldest.id == answer.request_id {
            return self.pending.pop_front();
        }
        warn!(
            "mailbox: missing an answer to request {} (got answer to {}), resending",
            oldest.id, answer.request_id
        );
        self.outbox.push(Message::Request(oldest.clone()));
        None
    }

    /// Requests still waiting for an answer, oldest first.
    pub fn pending(&self) -> impl Iterator<Item = &Request> {
        self.pending.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_to(request_id: u32) -> Answer {
        Answer {
            id: 100,
            request_id,
            verdict: Verdict::Yes,
            attachment: None,
        }
    }

    #[test]
    fn answers_fulfil_in_order() {
        let mut mb = Mailbox::new();
        let a = mb.send_request(Command::GetCheapestPath);
        let b = mb.send_request(Command::MorphUp);
        assert_eq!(mb.take_outgoing().len(), 2);
        assert!(mb.take_outgoing().is_empty());

        assert_eq!(mb.accept_answer(&answer_to(a)).unwrap().command, Command::GetCheapestPath);
        assert_eq!(mb.accept_answer(&answer_to(b)).unwrap().command, Command::MorphUp);
        assert_eq!(mb.pending_len(), 0);
    }

    #[test]
    fn mismatch_resends_oldest_without_dropping_it() {
        let mut mb = Mailbox::new();
        let a = mb.send_request(Command::GetCheapestPath);
        let b = mb.send_request(Command::MoveLeft);
        mb.take_outgoing();

        assert!(mb.accept_answer(&answer_to(b)).is_none());
        assert_eq!(mb.pending_len(), 2);
        let out = mb.take_outgoing();
        assert_eq!(
            out,
            vec![Message::Request(Request {
                id: a,
                command: Command::GetCheapestPath
            })]
        );
        assert!(mb.accept_answer(&answer_to(a)).is_some());
        assert!(mb.accept_answer(&answer_to(b)).is_some());
    }

    #[test]
    fn stray_answer_is_ignored() {
        let mut mb = Mailbox::new();
        assert!(mb.accept_answer(&answer_to(3)).is_none());
        assert!(mb.take_outgoing().is_empty());
    }

    #[test]
    fn answers_reference_the_request() {
        let mut mb = Mailbox::new();
        let req = Request {
            id: 41,
            command: Command::MoveRight,
        };
        mb.answer(&req, Verdict::No, None);
        match mb.take_outgoing().as_slice() {
            [Message::Answer(a)] => {
                assert_eq!(a.request_id, 41);
                assert_eq!(a.verdict, Verdict::No);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(mb.pending_len(), 0);
    }
}
