use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use waymark_blocks::BlockRegistry;
use waymark_geom::{BlockPos, Direction};
use waymark_pattern::{Resolver, defaults};
use waymark_placement::{StampParams, stamp};
use waymark_world::VoxelWorld;

fn load_registry() -> BlockRegistry {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    BlockRegistry::load_from_path(root.join("../../assets/blocks.toml")).unwrap()
}

fn bench_stamp_tunnel(c: &mut Criterion) {
    let mut group = c.benchmark_group("stamp_tunnel");
    let reg = Arc::new(load_registry());
    let rock = reg.id_by_name("game:rock-granite").unwrap();
    let mut world = VoxelWorld::new(reg);
    world.fill_box(BlockPos::new(-8, 40, -8), BlockPos::new(8, 72, 8), rock);
    let tunnel = defaults::default_tunnel();
    let resolver = Resolver::default();
    group.bench_function("carve_5x5_in_rock", |b| {
        b.iter(|| {
            let params = StampParams {
                pattern: &tunnel,
                slice_index: 0,
                origin: BlockPos::new(0, 64, 0),
                facing: Direction::East,
                carve_allowed: true,
            };
            black_box(stamp(&params, &resolver, &world));
        })
    });
    group.finish();
}

fn bench_resolve_directional(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_directional");
    let reg = load_registry();
    let resolver = Resolver::default();
    group.bench_function("stairs_all_facings", |b| {
        b.iter(|| {
            for facing in Direction::ALL {
                black_box(resolver.resolve("game:stairs-granite|f", facing, &reg));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_stamp_tunnel, bench_resolve_directional);
criterion_main!(benches);
