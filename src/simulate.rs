use std::error::Error;
use std::sync::Arc;

use clap::Args;
use waymark_blocks::BlockRegistry;
use waymark_geom::{BlockPos, Vec3};
use waymark_pattern::PatternSet;
use waymark_placement::{PatternBuilder, TickOutcome};
use waymark_world::VoxelWorld;

use crate::commands::{self, Paths};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Standing height of each column along +X, e.g. 64,64,63,62,62
    #[arg(long, value_delimiter = ',', default_value = "64,64,64,64,63,62,61,61,61,62,63,63")]
    pub heights: Vec<i32>,

    /// Pattern slot to use
    #[arg(long, default_value_t = 1)]
    pub slot: u32,

    /// Block the terrain is built from
    #[arg(long, default_value = "game:rock-granite")]
    pub ground: String,

    /// Position samples per cell walked
    #[arg(long, default_value_t = 4)]
    pub steps_per_cell: u32,
}

fn build_terrain(reg: Arc<BlockRegistry>, heights: &[i32], ground: &str) -> Result<VoxelWorld, Box<dyn Error>> {
    let ground_id = reg
        .id_by_name(ground)
        .ok_or_else(|| format!("ground block {} is not in the registry", ground))?;
    let floor = heights.iter().copied().min().unwrap_or(64) - 8;
    let mut world = VoxelWorld::new(reg);
    for (x, &h) in heights.iter().enumerate() {
        for z in -8..=8 {
            world.fill_column(x as i32, z, floor, h - 1, ground_id);
        }
    }
    Ok(world)
}

pub fn run(paths: &Paths, args: &SimulateArgs) -> Result<(), Box<dyn Error>> {
    if args.heights.len() < 2 {
        return Err("need at least two column heights".into());
    }
    let reg = Arc::new(commands::load_registry(&paths.blocks)?);
    let config = commands::load_config(&paths.config)?;
    let report = commands::load_patterns(paths, &reg)?;
    let mut world = build_terrain(reg.clone(), &args.heights, &args.ground)?;

    let mut builder = PatternBuilder::new(config, PatternSet::from_patterns(report.patterns));
    if builder.patterns().has_pattern(args.slot) {
        builder.switch_to_slot(args.slot)?;
    } else {
        log::warn!("slot {} is empty, using slot {}", args.slot, builder.patterns().current_slot());
    }
    let info = builder.current_pattern_info();
    println!(
        "pattern '{}' (slot {}, {}x{}x{}, {})",
        info.name, info.slot, info.width, info.height, info.depth, info.mode
    );

    let stand = |x: f32| -> f32 {
        let i = (x.floor() as usize).min(args.heights.len() - 1);
        args.heights[i] as f32
    };
    builder.set_building_enabled(true, Some(Vec3::new(0.5, stand(0.5), 0.5)));
    let steps = args.steps_per_cell.max(1);
    let last_cell = args.heights.len() as u32 - 1;
    let mut placements = 0usize;
    for i in 0..=(last_cell * steps) {
        let x = 0.5 + i as f32 / steps as f32;
        let player = Vec3::new(x, stand(x), 0.5);
        match builder.tick(Some(player), &mut world) {
            TickOutcome::Placed(r) => {
                placements += 1;
                println!(
                    "tick {:>3} player {} -> {} at {} facing {} (slice {}, {} writes)",
                    i,
                    player.block_pos(),
                    r.pattern_type,
                    r.origin,
                    r.direction,
                    r.slice_index + 1,
                    r.writes.len()
                );
                for w in &r.writes {
                    println!("    {} {}{}", w.pos, reg.name_of(w.block), if w.auto_connect { " (auto)" } else { "" });
                }
                for issue in &r.issues {
                    println!("    ! {}", issue);
                }
                for pos in world.take_neighbor_updates() {
                    println!("    ~ neighbor update {}", pos);
                }
            }
            TickOutcome::Vetoed { required } => {
                println!("tick {:>3} vetoed ({} block types)", i, required.len());
                break;
            }
            TickOutcome::Disabled => break,
            TickOutcome::NoPlayer | TickOutcome::Idle => {}
        }
    }
    let stats = world.stats();
    println!(
        "{} placement(s), {} block write(s), {} neighbor update(s), final preview {} cell(s) near {}",
        placements,
        stats.writes,
        stats.neighbor_updates,
        builder.preview().len(),
        BlockPos::new(last_cell as i32, args.heights[last_cell as usize], 0)
    );
    Ok(())
}
