//! Room boundary report for a JSON document.
//!
//! Usage:
//! ```text
//! cargo run --example room_report                                  # demos/office.json
//! cargo run --example room_report -- plan.json                     # another document
//! cargo run --example room_report -- plan.json '{"doors":"all","door_depth_ratio":1.0}'
//! ```

use std::error::Error;
use std::fs;

use roomline::document::MemoryDocument;
use roomline::error::BoundaryError;
use roomline::geometry::CurveLoop;
use roomline::kernel::PrismKernel;
use roomline::{BoundaryOptions, Room, RoomlineError};

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for roomline.
    // Override with RUST_LOG env var (e.g. RUST_LOG=roomline=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("roomline=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "demos/office.json".into());
    let options: BoundaryOptions = match args.next() {
        Some(json) => serde_json::from_str(&json)?,
        None => BoundaryOptions::default(),
    };

    let document: MemoryDocument = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let mut kernel = PrismKernel::new();

    for region in document.regions() {
        let room = Room::new(&document, region.id)?;
        println!("{} {} ({})", room.number(), room.name(), room.id());
        for door in room.doors() {
            println!("  door {}", door.id);
        }

        match room.boundaries(&mut kernel, &options) {
            Ok(loops) => print_loops(&loops),
            Err(RoomlineError::Boundary(BoundaryError::BoundaryUnavailable { reason, .. })) => {
                println!("  boundary unavailable: {reason}");
                let elements = room.boundary_elements()?;
                let ids: Vec<String> =
                    elements.elements().iter().map(ToString::to_string).collect();
                println!("  bounded by {}", ids.join(", "));
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn print_loops(loops: &[CurveLoop]) {
    for (index, curve_loop) in loops.iter().enumerate() {
        println!("  loop {index}: area {:.4}", curve_loop.signed_area());
        for p in curve_loop.vertices() {
            println!("    ({:.4}, {:.4}, {:.4})", p.x, p.y, p.z);
        }
    }
}
