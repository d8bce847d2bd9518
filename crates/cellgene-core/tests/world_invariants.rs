use cellgene_core::constants::MAX_MUTATION_DEPTH;
use cellgene_core::{SimConfig, SimParams, World};

fn busy_world(seed: u64) -> World {
    let config = SimConfig {
        seed,
        width: 40,
        height: 32,
        params: SimParams {
            photosynth_energy: 0.1,
            mutation_chance: 0.5,
            population_density: 0.1,
            spawn_energy: 0.3,
            ..SimParams::default()
        },
    };
    let mut world = World::new(config).expect("config is valid");
    world.regenerate();
    world
}

#[test]
fn every_live_tile_resolves_its_gene_after_each_tick() {
    let mut world = busy_world(11);
    let tiles = (world.width() * world.height()) as usize;
    for _ in 0..300 {
        world.step();
        let counters = world.last_step();
        assert!(counters.visited <= tiles);
        // Only destinations of births and moves can be skipped.
        assert!(counters.visited + counters.births + counters.moves >= tiles);
        for tile in world.tiles().iter().filter(|t| t.is_alive()) {
            let gene = world
                .gene(tile.gene)
                .unwrap_or_else(|| panic!("tile points at evicted gene {}", tile.gene));
            assert!(gene.handle().get() as usize <= world.gene_count());
        }
    }
}

#[test]
fn surviving_genes_are_referenced_and_within_depth_cap() {
    let mut world = busy_world(23);
    let mut saw_mutation = false;
    for _ in 0..300 {
        world.step();
        saw_mutation |= world.last_step().mutations > 0;
        for gene in world.genes().iter() {
            assert!(gene.reference_count() > 0, "gene {} survived unreferenced", gene.handle());
            assert!(gene.mutation_depth() <= MAX_MUTATION_DEPTH);
            assert_eq!(world.gene(gene.handle()).map(|g| g.handle()), Some(gene.handle()));
        }
        assert!(world.genes().species_count() <= world.genes().live_count());
        assert!(world.tiles().iter().all(|t| t.energy >= 0.0 || t.is_alive()));
    }
    assert!(saw_mutation, "a busy world should mutate within 300 ticks");
}

#[test]
fn independent_worlds_do_not_share_state() {
    let mut a = busy_world(5);
    let mut b = busy_world(5);
    for _ in 0..50 {
        a.step();
    }
    assert_eq!(b.tick_count(), 0);
    for _ in 0..50 {
        b.step();
    }
    assert_eq!(a.tiles(), b.tiles());
}
