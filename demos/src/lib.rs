//! A toy stand-in for the host game, shared by the demo binaries.
//!
//! The world has no physics: each tick a mover slides a fixed step
//! straight towards the next node of its current path, and a diamond is
//! caught as soon as it lies inside a mover's body.

use geofriends_core::{Block, Level, MoverKind, MoverState, Point, Range, SensorUpdate};
use geofriends_nav::{Message, Navigator, Path};
use log::info;
use rand::{Rng, SeedableRng};

pub const WIDTH: i32 = 1200;
pub const HEIGHT: i32 = 600;
/// Pixels a mover travels per tick.
pub const STEP: i32 = 8;
pub const DIAMONDS: usize = 6;

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// A walled room with a floor, a central pillar, one platform per mover and
/// `DIAMONDS` diamonds scattered by `seed`.
pub fn demo_level(seed: u64) -> Level {
    let obstacles = vec![
        Block::new(Point::new(WIDTH / 2, HEIGHT - 5), WIDTH, 10),
        Block::new(Point::new(5, HEIGHT / 2), 10, HEIGHT),
        Block::new(Point::new(WIDTH - 5, HEIGHT / 2), 10, HEIGHT),
        Block::new(Point::new(WIDTH / 2, 480), 40, 220),
    ];
    let circle_platforms = vec![Block::new(Point::new(300, 380), 160, 10)];
    let rectangle_platforms = vec![Block::new(Point::new(900, 400), 160, 10)];

    let solids: Vec<Range> = obstacles
        .iter()
        .chain(&circle_platforms)
        .chain(&rectangle_platforms)
        .map(|b| {
            let r = b.bounds();
            Range::new(r.min.x - 10, r.min.y - 10, r.max.x + 10, r.max.y + 10)
        })
        .collect();

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut diamonds = Vec::with_capacity(DIAMONDS);
    while diamonds.len() < DIAMONDS {
        let p = Point::new(rng.random_range(40..WIDTH - 40), rng.random_range(360..560));
        if solids.iter().any(|r| r.contains(p)) || diamonds.contains(&p) {
            continue;
        }
        diamonds.push(p);
    }

    Level {
        area: Range::new(0, 0, WIDTH, HEIGHT),
        circle: MoverState::new(Point::new(150, HEIGHT - 30), 20),
        rectangle: MoverState::new(Point::new(1000, HEIGHT - 60), 100),
        obstacles,
        circle_platforms,
        rectangle_platforms,
        diamonds,
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// The simulated game state.
#[derive(Debug, Clone)]
pub struct World {
    pub circle: MoverState,
    pub rectangle: MoverState,
    pub diamonds: Vec<Point>,
    pub tick: u32,
}

impl World {
    pub fn new(level: &Level) -> Self {
        Self {
            circle: level.circle,
            rectangle: level.rectangle,
            diamonds: level.diamonds.clone(),
            tick: 0,
        }
    }

    /// What the sensors report right now.
    pub fn snapshot(&self) -> SensorUpdate {
        SensorUpdate {
            circle: self.circle,
            rectangle: self.rectangle,
            diamonds: self.diamonds.clone(),
        }
    }

    fn mover_mut(&mut self, kind: MoverKind) -> &mut MoverState {
        match kind {
            MoverKind::Circle => &mut self.circle,
            MoverKind::Rectangle => &mut self.rectangle,
        }
    }

    /// Slide `kind` up to `STEP` pixels towards `waypoint`. Without a
    /// waypoint the mover stops.
    pub fn step_mover(&mut self, kind: MoverKind, waypoint: Option<Point>) {
        let m = self.mover_mut(kind);
        let from = m.pos;
        let to = match waypoint {
            Some(w) => step_towards(from, w, STEP),
            None => from,
        };
        m.pos = to;
        m.velocity = to - from;
    }

    /// Remove the diamonds inside either body. Returns what each mover
    /// caught.
    pub fn collect(&mut self, rectangle_area: i32) -> Vec<(MoverKind, Point)> {
        let bodies = [
            (MoverKind::Circle, self.circle.footprint(MoverKind::Circle, rectangle_area)),
            (
                MoverKind::Rectangle,
                self.rectangle.footprint(MoverKind::Rectangle, rectangle_area),
            ),
        ];
        let mut caught = Vec::new();
        self.diamonds.retain(|&d| {
            match bodies.iter().find(|(_, body)| body.contains(d)) {
                Some(&(kind, _)) => {
                    caught.push((kind, d));
                    false
                }
                None => true,
            }
        });
        caught
    }

    pub fn is_done(&self) -> bool {
        self.diamonds.is_empty()
    }
}

fn step_towards(from: Point, to: Point, step: i32) -> Point {
    let dist = from.distance(to);
    if dist <= step as f32 {
        return to;
    }
    let d = to - from;
    let k = step as f32 / dist;
    from + Point::new((d.x as f32 * k).round() as i32, (d.y as f32 * k).round() as i32)
}

/// The first node of `path` after `pos`.
pub fn next_waypoint(path: &Path, pos: Point) -> Option<Point> {
    path.nodes().iter().skip(1).map(|n| n.pos).find(|&p| p != pos)
}

// ---------------------------------------------------------------------------
// Mover tick
// ---------------------------------------------------------------------------

/// What a mover tells the world after its tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub mover: MoverKind,
    pub waypoint: Option<Point>,
    pub target: Option<Point>,
}

/// One planning tick: apply the latest snapshot, handle the other mover's
/// messages and decide where to head. Returns the messages for the other
/// mover and the report for the world.
pub fn mover_tick(nav: &mut Navigator, incoming: Vec<Message>) -> (Vec<Message>, Report) {
    nav.update();
    nav.handle_messages(incoming);
    for action in nav.take_actions() {
        info!("{}: asked to {action:?}", nav.mover());
    }
    let pos = nav.graph().mover_node().map(|n| n.pos);
    let waypoint = match (nav.current_path(), pos) {
        (Some(path), Some(pos)) => next_waypoint(path, pos),
        _ => None,
    };
    let report = Report {
        mover: nav.mover(),
        waypoint,
        target: nav.target().map(|t| t.pos),
    };
    (nav.take_outgoing(), report)
}

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub ticks: u32,
    pub caught: Vec<(MoverKind, Point)>,
    pub left: Vec<Point>,
}

/// Run both movers in lockstep on the current thread. Messages sent during
/// one tick are delivered at the next.
pub fn run_lockstep(level: &Level, max_ticks: u32) -> Result<Outcome, geofriends_nav::NavError> {
    let cfg = geofriends_nav::NavConfig::default();
    let area = cfg.rectangle_area;
    let mut circle = Navigator::setup(MoverKind::Circle, level, cfg.clone())?;
    let mut rectangle = Navigator::setup(MoverKind::Rectangle, level, cfg)?;
    let (circle_feed, rectangle_feed) = (circle.sensor_feed(), rectangle.sensor_feed());

    let mut world = World::new(level);
    let mut to_circle = Vec::new();
    let mut to_rectangle = Vec::new();
    let mut caught = Vec::new();

    while world.tick < max_ticks && !world.is_done() {
        circle_feed.publish(world.snapshot());
        rectangle_feed.publish(world.snapshot());

        let (out_c, rep_c) = mover_tick(&mut circle, std::mem::take(&mut to_circle));
        let (out_r, rep_r) = mover_tick(&mut rectangle, std::mem::take(&mut to_rectangle));
        to_rectangle = out_c;
        to_circle = out_r;

        world.step_mover(rep_c.mover, rep_c.waypoint);
        world.step_mover(rep_r.mover, rep_r.waypoint);
        for (kind, d) in world.collect(area) {
            info!("tick {}: {kind} caught diamond at {d}", world.tick);
            caught.push((kind, d));
        }
        world.tick += 1;
    }

    Ok(Outcome {
        ticks: world.tick,
        caught,
        left: world.diamonds,
    })
}
