//! Messages exchanged between the two movers.
//!
//! Every message carries an id from the sender's [`MessageIds`]. Requests
//! carry a [`Command`]; answers name the request they answer.

use std::fmt;

use crate::node::Node;
use crate::path::Path;

/// What one mover asks the other to do.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    MoveLeft,
    MoveRight,
    MorphUp,
    MorphDown,
    /// Reply with your cheapest known path.
    GetCheapestPath,
    /// Pursue this diamond.
    CatchDiamond(Node),
    /// Give up this diamond and pursue your next cheapest.
    CatchNextDiamond(Node),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveLeft => f.write_str("move left"),
            Self::MoveRight => f.write_str("move right"),
            Self::MorphUp => f.write_str("morph up"),
            Self::MorphDown => f.write_str("morph down"),
            Self::GetCheapestPath => f.write_str("get cheapest path"),
            Self::CatchDiamond(n) => write!(f, "catch diamond at {}", n.pos),
            Self::CatchNextDiamond(n) => write!(f, "catch next diamond, ceding {}", n.pos),
        }
    }
}

/// Physical actions the movement layer carries out on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    MoveLeft,
    MoveRight,
    MorphUp,
    MorphDown,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    pub id: u32,
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Yes,
    No,
}

/// Data returned along with an answer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attachment {
    Path(Path),
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Answer {
    pub id: u32,
    pub request_id: u32,
    pub verdict: Verdict,
    pub attachment: Option<Attachment>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    Request(Request),
    Answer(Answer),
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(r) => write!(f, "request {}: {}", r.id, r.command),
            Self::Answer(a) => write!(f, "answer {} to request {}: {:?}", a.id, a.request_id, a.verdict),
        }
    }
}

/// Message id counter. Wraps to zero before reaching `u32::MAX`.
#[derive(Debug, Default, Clone)]
pub struct MessageIds {
    next: u32,
}

impl MessageIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next id.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = if self.next >= u32::MAX - 1 { 0 } else { self.next + 1 };
        id
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use geofriends_core::{ObjectKind, Point};

    #[test]
    fn catch_request_round_trip() {
        let m = Message::Request(Request {
            id: 9,
            command: Command::CatchDiamond(Node {
                index: 12,
                pos: Point::new(300, 120),
                kind: ObjectKind::Diamond,
            }),
        });
        let json = serde_json::to_string(&m).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
