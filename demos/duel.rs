//! Two movers collecting diamonds, each planning on its own thread.
//!
//! The main thread owns the world. Every tick it publishes a snapshot to
//! both sensor feeds, wakes the movers and waits for their reports before
//! stepping the bodies. Movers talk to each other only through bounded
//! message queues.
//!
//! ```bash
//! cargo run --bin duel -- 7      # level seed
//! RUST_LOG=debug cargo run --bin duel
//! ```

use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread::{self, JoinHandle};

use geofriends_core::{Level, MoverKind};
use geofriends_demos::{Report, World, demo_level, mover_tick};
use geofriends_nav::{Message, NavConfig, NavError, Navigator};
use log::{debug, error, info, warn};

const MAX_TICKS: u32 = 5_000;
const QUEUE_DEPTH: usize = 64;

enum Tick {
    Step(u32),
    Stop,
}

struct Mover {
    ticks: SyncSender<Tick>,
    handle: JoinHandle<()>,
}

fn spawn_mover(
    mut nav: Navigator,
    peer_tx: SyncSender<Vec<Message>>,
    peer_rx: Receiver<Vec<Message>>,
    reports: SyncSender<Report>,
) -> std::io::Result<Mover> {
    let (tick_tx, tick_rx) = sync_channel::<Tick>(1);
    let name = nav.mover().to_string().to_lowercase();
    let handle = thread::Builder::new().name(name).spawn(move || {
        while let Ok(Tick::Step(n)) = tick_rx.recv() {
            let incoming: Vec<Message> = peer_rx.try_iter().flatten().collect();
            let (outgoing, report) = mover_tick(&mut nav, incoming);
            debug!("tick {n}: {} heading to {:?}", report.mover, report.waypoint);
            if !outgoing.is_empty() && peer_tx.send(outgoing).is_err() {
                warn!("{}: peer queue closed", report.mover);
            }
            if reports.send(report).is_err() {
                break;
            }
        }
        info!("{}: stopping, {} diamonds seen caught", nav.mover(), nav.caught().len());
    })?;
    Ok(Mover {
        ticks: tick_tx,
        handle,
    })
}

fn run(level: &Level) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = NavConfig::default();
    let area = cfg.rectangle_area;
    let circle = Navigator::setup(MoverKind::Circle, level, cfg.clone())?;
    let rectangle = Navigator::setup(MoverKind::Rectangle, level, cfg)?;
    let feeds = [circle.sensor_feed(), rectangle.sensor_feed()];

    let (to_rect_tx, to_rect_rx) = sync_channel(QUEUE_DEPTH);
    let (to_circle_tx, to_circle_rx) = sync_channel(QUEUE_DEPTH);
    let (report_tx, report_rx) = sync_channel(2);

    let movers = [
        spawn_mover(circle, to_rect_tx, to_circle_rx, report_tx.clone())?,
        spawn_mover(rectangle, to_circle_tx, to_rect_rx, report_tx)?,
    ];

    let mut world = World::new(level);
    while world.tick < MAX_TICKS && !world.is_done() {
        for feed in &feeds {
            feed.publish(world.snapshot());
        }
        for m in &movers {
            m.ticks.send(Tick::Step(world.tick))?;
        }
        for _ in &movers {
            let report = report_rx.recv()?;
            world.step_mover(report.mover, report.waypoint);
        }
        for (kind, d) in world.collect(area) {
            info!("tick {}: {kind} caught diamond at {d}", world.tick);
        }
        world.tick += 1;
    }

    if world.is_done() {
        info!("all diamonds collected in {} ticks", world.tick);
    } else {
        warn!("gave up after {} ticks, {} diamonds left", world.tick, world.diamonds.len());
    }

    for m in movers {
        // the thread may already have exited
        let _ = m.ticks.send(Tick::Stop);
        if m.handle.join().is_err() {
            error!("mover thread panicked");
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = match std::env::args().nth(1).map(|s| s.parse::<u64>()) {
        None => 7,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("usage: duel [SEED]: {e}");
            std::process::exit(2);
        }
    };
    info!("level seed {seed}");

    if let Err(e) = run(&demo_level(seed)) {
        match e.downcast_ref::<NavError>() {
            Some(nav) => error!("setup failed: {nav}"),
            None => error!("{e}"),
        }
        std::process::exit(1);
    }
}
