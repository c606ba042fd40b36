//! One mover's planner: map, graph, known paths and the conversation with
//! the other mover.
//!
//! A navigator is driven by its host from a single thread: sensor
//! snapshots arrive through the shared [`SensorFeed`], `update` applies the
//! latest one once per tick, and messages from the other mover are handed
//! in with `handle_messages`. Nothing else is shared between the two
//! movers.

use geofriends_core::{Level, MoverKind, MoverState, SensorUpdate};
use geofriends_paths::SearchArena;
use log::{debug, info, trace};

use crate::arbiter::{Decision, arbitrate};
use crate::config::NavConfig;
use crate::error::NavError;
use crate::facts::TargetFacts;
use crate::graph::Graph;
use crate::mailbox::Mailbox;
use crate::map::Map;
use crate::node::Node;
use crate::path::Path;
use crate::protocol::{Action, Attachment, Command, Message, Request, Verdict};
use crate::reach::ReachPolicy;
use crate::registry::PathRegistry;
use crate::sensors::SensorFeed;

/// Planner state for one mover.
#[derive(Debug)]
pub struct Navigator {
    mover: MoverKind,
    cfg: NavConfig,
    reach: ReachPolicy,
    map: Map,
    graph: Graph,
    arena: SearchArena,
    mailbox: Mailbox,
    feed: SensorFeed,
    circle: MoverState,
    rectangle: MoverState,
    // diamonds believed to be still in play
    uncaught: Vec<Node>,
    caught: Vec<Node>,
    cooperative: Vec<Node>,
    target: Option<Node>,
    actions: Vec<Action>,
}

impl Navigator {
    /// Build the map and graph for `mover`, find a path to every reachable
    /// diamond and pick the cheapest as the first target. The leader also
    /// opens arbitration by asking the other mover for its cheapest path.
    pub fn setup(mover: MoverKind, level: &Level, cfg: NavConfig) -> Result<Self, NavError> {
        cfg.validate()?;
        let map = Map::from_level(level, &cfg)?;
        let mut graph = Graph::build(mover, level, &cfg, &map)?;
        let mut arena = SearchArena::new(graph.len());
        let reach = ReachPolicy::new(&cfg);

        let cooperative = graph.seed_from_all_targets(&mut arena, &reach, &map);
        let uncaught: Vec<Node> = graph.diamond_nodes().copied().collect();
        let target = graph.cheapest_known_path().map(|p| *p.goal());

        info!(
            "{mover}: {} of {} diamonds reachable, {} need help",
            graph.known_paths().len(),
            uncaught.len(),
            cooperative.len()
        );

        let mut nav = Self {
            mover,
            reach,
            map,
            graph,
            arena,
            mailbox: Mailbox::new(),
            feed: SensorFeed::new(),
            circle: level.circle,
            rectangle: level.rectangle,
            uncaught,
            caught: Vec::new(),
            cooperative,
            target,
            actions: Vec::new(),
            cfg,
        };
        if let Some(t) = nav.target {
            info!("{mover}: first target {}", t.pos);
        }
        if nav.is_leader() {
            nav.open_arbitration();
        }
        Ok(nav)
    }

    #[inline]
    pub fn mover(&self) -> MoverKind {
        self.mover
    }

    /// Whether this mover opens and decides arbitration.
    #[inline]
    pub fn is_leader(&self) -> bool {
        self.cfg.leader == self.mover
    }

    /// A handle for the host's sensor callback.
    pub fn sensor_feed(&self) -> SensorFeed {
        self.feed.clone()
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Apply the latest sensor snapshot, if one arrived. Returns whether
    /// anything was applied.
    pub fn update(&mut self) -> bool {
        let Some(snapshot) = self.feed.take() else {
            return false;
        };
        self.apply(&snapshot);
        true
    }

    fn apply(&mut self, snapshot: &SensorUpdate) {
        self.circle = snapshot.circle;
        self.rectangle = snapshot.rectangle;
        self.map.refresh(&self.circle, &self.rectangle);
        self.graph
            .refresh(&self.map, self.circle.pos, self.rectangle.pos, self.rectangle.size);

        let (gone, still): (Vec<Node>, Vec<Node>) = self
            .uncaught
            .iter()
            .copied()
            .partition(|n| !snapshot.diamonds.contains(&n.pos));
        self.uncaught = still;

        let any_caught = !gone.is_empty();
        for node in gone {
            info!("{}: diamond at {} caught", self.mover, node.pos);
            self.cooperative.retain(|c| c != &node);
            if self.target == Some(node) {
                self.catch_next(&node);
            } else {
                self.graph.remove_target(&node);
            }
            self.caught.push(node);
        }

        if let Some(t) = self.target {
            if self.graph.recompute_for(&mut self.arena, t.index).is_none() {
                trace!("{}: no fresh path to {} this tick", self.mover, t.pos);
            }
        }

        if any_caught && self.is_leader() {
            self.open_arbitration();
        }
    }

    fn open_arbitration(&mut self) {
        let asking = self
            .mailbox
            .pending()
            .any(|r| r.command == Command::GetCheapestPath);
        if !asking {
            self.mailbox.send_request(Command::GetCheapestPath);
        }
    }

    // -----------------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------------

    /// Handle messages from the other mover, in arrival order.
    pub fn handle_messages(&mut self, messages: Vec<Message>) {
        for msg in messages {
            trace!("{}: received {msg}", self.mover);
            match msg {
                Message::Request(req) => self.execute(&req),
                Message::Answer(ans) => {
                    let Some(fulfilled) = self.mailbox.accept_answer(&ans) else {
                        continue;
                    };
                    if fulfilled.command != Command::GetCheapestPath {
                        continue;
                    }
                    match ans.attachment {
                        Some(Attachment::Path(claim)) => self.decide(&claim),
                        None => debug!("{}: other mover has no path to offer", self.mover),
                    }
                }
            }
        }
    }

    fn execute(&mut self, req: &Request) {
        let (verdict, attachment) = match &req.command {
            Command::MoveLeft => self.queue_action(Action::MoveLeft),
            Command::MoveRight => self.queue_action(Action::MoveRight),
            Command::MorphUp => self.queue_action(Action::MorphUp),
            Command::MorphDown => self.queue_action(Action::MorphDown),
            Command::GetCheapestPath => match self.graph.cheapest_known_path() {
                Some(p) => (Verdict::Yes, Some(Attachment::Path(p.clone()))),
                None => (Verdict::No, None),
            },
            Command::CatchDiamond(node) => {
                if self.catch_diamond(node) {
                    (Verdict::Yes, None)
                } else {
                    (Verdict::No, None)
                }
            }
            Command::CatchNextDiamond(node) => {
                self.catch_next(node);
                (Verdict::Yes, None)
            }
        };
        self.mailbox.answer(req, verdict, attachment);
    }

    fn queue_action(&mut self, action: Action) -> (Verdict, Option<Attachment>) {
        self.actions.push(action);
        (Verdict::Yes, None)
    }

    /// Leader side: compare the local cheapest path with the other mover's.
    fn decide(&mut self, claim: &Path) {
        let other_goal = *claim.goal();
        let Some(holder) = self.graph.cheapest_known_path().cloned() else {
            info!("{}: nothing to pursue, {} keeps {}", self.mover, self.mover.other(), other_goal.pos);
            self.mailbox.send_request(Command::CatchDiamond(other_goal));
            return;
        };
        let decision = arbitrate(&holder, claim);
        info!(
            "{}: arbitration {:?} ({} {:.1} vs {} {:.1})",
            self.mover,
            decision,
            holder.goal().pos,
            holder.cost(),
            other_goal.pos,
            claim.cost()
        );
        match decision {
            Decision::Split => {
                self.mailbox.send_request(Command::CatchDiamond(other_goal));
                self.catch_diamond(holder.goal());
            }
            Decision::ClaimWins => {
                self.mailbox.send_request(Command::CatchDiamond(other_goal));
                self.catch_next(holder.goal());
            }
            Decision::HolderWins => {
                self.mailbox.send_request(Command::CatchNextDiamond(other_goal));
                self.catch_diamond(holder.goal());
            }
        }
    }

    /// Ask the other mover to perform a physical action.
    pub fn request_action(&mut self, action: Action) -> u32 {
        let command = match action {
            Action::MoveLeft => Command::MoveLeft,
            Action::MoveRight => Command::MoveRight,
            Action::MorphUp => Command::MorphUp,
            Action::MorphDown => Command::MorphDown,
        };
        self.mailbox.send_request(command)
    }

    /// Drain messages for the other mover.
    pub fn take_outgoing(&mut self) -> Vec<Message> {
        self.mailbox.take_outgoing()
    }

    /// Drain actions the other mover asked for.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    // -----------------------------------------------------------------------
    // Targets
    // -----------------------------------------------------------------------

    /// Pursue `node` if a path to it is registered. `node` may come from
    /// the other mover's graph.
    pub fn catch_diamond(&mut self, node: &Node) -> bool {
        let Some(path) = self.graph.known_paths().get(node) else {
            debug!("{}: no known path to {}", self.mover, node.pos);
            return false;
        };
        let local = *path.goal();
        if self.target != Some(local) {
            info!("{}: pursuing diamond at {}", self.mover, local.pos);
        }
        self.target = Some(local);
        true
    }

    /// Give up `node` and pursue the next cheapest diamond. Returns the new
    /// target.
    pub fn catch_next(&mut self, node: &Node) -> Option<Node> {
        let next = self.graph.remove_target(node).map(|p| *p.goal());
        match next {
            Some(n) => info!("{}: dropping {}, next diamond at {}", self.mover, node.pos, n.pos),
            None => info!("{}: dropping {}, nothing left to pursue", self.mover, node.pos),
        }
        self.target = next;
        next
    }

    /// The diamond being pursued.
    pub fn target(&self) -> Option<&Node> {
        self.target.as_ref()
    }

    /// The registered path to the current target.
    pub fn current_path(&self) -> Option<&Path> {
        self.target.as_ref().and_then(|t| self.graph.known_paths().get(t))
    }

    pub fn cheapest_known_path(&self) -> Option<&Path> {
        self.graph.cheapest_known_path()
    }

    pub fn known_paths(&self) -> &PathRegistry {
        self.graph.known_paths()
    }

    /// Diamonds out of reach alone but within reach of both movers working
    /// together.
    pub fn cooperative_targets(&self) -> &[Node] {
        &self.cooperative
    }

    /// Diamonds seen disappearing, in order.
    pub fn caught(&self) -> &[Node] {
        &self.caught
    }

    /// Positional facts about the current target, if any.
    pub fn facts(&self) -> Option<TargetFacts> {
        let target = self.target?;
        let (me, other) = match self.mover {
            MoverKind::Circle => (&self.circle, &self.rectangle),
            MoverKind::Rectangle => (&self.rectangle, &self.circle),
        };
        Some(TargetFacts::compute(
            self.mover,
            me,
            other,
            target.pos,
            &self.map,
            self.cfg.facts_margin,
            self.cfg.rectangle_area,
        ))
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn reach(&self) -> &ReachPolicy {
        &self.reach
    }

    pub fn config(&self) -> &NavConfig {
        &self.cfg
    }

    /// Requests still waiting for an answer from the other mover.
    pub fn pending_requests(&self) -> usize {
        self.mailbox.pending_len()
    }
}
