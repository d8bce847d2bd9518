use crate::constants::{GENE_COMMANDS_COUNT, MAX_MUTATION_DEPTH};
use crate::gene::{Gene, GeneHandle, Instruction, Rgb};
use rand::Rng;

/// Slot arena owning every gene. Handle `h` always lives in slot `h - 1`;
/// freed slots are reused by later allocations.
#[derive(Clone, Debug, Default)]
pub struct GenePool {
    slots: Vec<Option<Gene>>,
}

impl GenePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a gene in the first free slot (or a new one) with depth 0 and
    /// a random colour. Commands start zeroed; callers fill them in.
    pub fn add_gene<R: Rng + ?Sized>(&mut self, parent: GeneHandle, rng: &mut R) -> GeneHandle {
        let color = Rgb::random(rng);
        self.insert_with(|handle| Gene::new(handle, parent, color))
    }

    fn insert_with(&mut self, build: impl FnOnce(GeneHandle) -> Gene) -> GeneHandle {
        let slot = match self.slots.iter().position(Option::is_none) {
            Some(free) => free,
            None => {
                self.slots.push(None);
                self.slots.len() - 1
            }
        };
        let handle = GeneHandle::from_slot(slot);
        self.slots[slot] = Some(build(handle));
        handle
    }

    pub fn get(&self, handle: GeneHandle) -> Option<&Gene> {
        handle
            .slot()
            .and_then(|slot| self.slots.get(slot))
            .and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, handle: GeneHandle) -> Option<&mut Gene> {
        handle
            .slot()
            .and_then(|slot| self.slots.get_mut(slot))
            .and_then(Option::as_mut)
    }

    pub fn contains(&self, handle: GeneHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Clone `source` with one random slot overwritten by a random byte in
    /// `[0, GENE_COMMANDS_COUNT + OPCODE_COUNT)`.
    ///
    /// Below the depth cap the child continues the source's species and colour;
    /// at the cap the source becomes the root of a new species with a fresh
    /// colour. Returns `None` when `source` does not resolve.
    pub fn mutate<R: Rng + ?Sized>(&mut self, source: GeneHandle, rng: &mut R) -> Option<GeneHandle> {
        let index = rng.random_range(0..GENE_COMMANDS_COUNT);
        let command = rng.random_range(0..GENE_COMMANDS_COUNT as u8 + Instruction::OPCODE_COUNT);

        let template = self.get(source)?.clone();
        let (parent, depth, color) = if template.mutation_depth() < MAX_MUTATION_DEPTH {
            (
                template.parent_handle(),
                template.mutation_depth() + 1,
                template.color(),
            )
        } else {
            (template.handle(), 0, Rgb::random(rng))
        };

        let handle = self.insert_with(|handle| {
            let mut gene = Gene::new(handle, parent, color);
            gene.set_mutation_depth(depth);
            gene.copy_commands_from(&template);
            gene.set_command(index, command);
            gene
        });
        Some(handle)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn reset_reference_counts(&mut self) {
        for gene in self.slots.iter_mut().flatten() {
            gene.reference_count = 0;
        }
    }

    /// Count one more live tile for `handle`. Unknown handles are ignored.
    pub fn add_reference(&mut self, handle: GeneHandle) {
        if let Some(gene) = self.get_mut(handle) {
            gene.reference_count += 1;
        }
    }

    /// Free every gene that no tile referenced this tick. Returns how many.
    pub fn evict_unreferenced(&mut self) -> usize {
        let mut evicted = 0;
        for slot in &mut self.slots {
            if slot.as_ref().is_some_and(|gene| gene.reference_count == 0) {
                *slot = None;
                evicted += 1;
            }
        }
        evicted
    }

    /// Number of slots, occupied or not. This is the upper bound of valid handles.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Distinct species (parent handles) among live genes.
    pub fn species_count(&self) -> usize {
        let mut parents: Vec<GeneHandle> = self.iter().map(Gene::parent_handle).collect();
        parents.sort_unstable();
        parents.dedup();
        parents.len()
    }

    /// Live genes in handle order.
    pub fn iter(&self) -> impl Iterator<Item = &Gene> {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn seeded_pool(rng: &mut ChaCha12Rng) -> (GenePool, GeneHandle) {
        let mut pool = GenePool::new();
        let seed = pool.add_gene(GeneHandle::NONE, rng);
        pool.get_mut(seed).unwrap().fill(Instruction::PHOTOSYNTH);
        (pool, seed)
    }

    #[test]
    fn handles_are_one_based_and_resolve_to_their_slot() {
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let mut pool = GenePool::new();
        let a = pool.add_gene(GeneHandle::NONE, &mut rng);
        let b = pool.add_gene(a, &mut rng);
        assert_eq!(a, GeneHandle::new(1));
        assert_eq!(b, GeneHandle::new(2));
        assert_eq!(pool.get(b).unwrap().handle(), b);
        assert_eq!(pool.get(b).unwrap().parent_handle(), a);
        assert!(pool.get(GeneHandle::NONE).is_none());
        assert!(pool.get(GeneHandle::new(3)).is_none());
    }

    #[test]
    fn freed_slot_is_reused_with_its_own_handle() {
        let mut rng = ChaCha12Rng::seed_from_u64(2);
        let mut pool = GenePool::new();
        let a = pool.add_gene(GeneHandle::NONE, &mut rng);
        let b = pool.add_gene(GeneHandle::NONE, &mut rng);
        let _c = pool.add_gene(GeneHandle::NONE, &mut rng);

        pool.reset_reference_counts();
        pool.add_reference(a);
        pool.add_reference(GeneHandle::new(3));
        assert_eq!(pool.evict_unreferenced(), 1);
        assert!(!pool.contains(b));
        assert_eq!(pool.slot_count(), 3);
        assert_eq!(pool.live_count(), 2);

        let reused = pool.add_gene(GeneHandle::NONE, &mut rng);
        assert_eq!(reused, b);
        assert_eq!(pool.slot_count(), 3);
    }

    #[test]
    fn shallow_mutation_keeps_species_and_colour() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let (mut pool, seed) = seeded_pool(&mut rng);
        let child = pool.mutate(seed, &mut rng).unwrap();

        let parent = pool.get(seed).unwrap();
        let gene = pool.get(child).unwrap();
        assert_ne!(child, seed);
        assert_eq!(gene.parent_handle(), parent.parent_handle());
        assert_eq!(gene.mutation_depth(), 1);
        assert_eq!(gene.color(), parent.color());
        let differing = gene
            .commands()
            .iter()
            .zip(parent.commands())
            .filter(|(a, b)| a != b)
            .count();
        assert!(differing <= 1);
        assert!(
            gene.commands()
                .iter()
                .all(|&c| c < GENE_COMMANDS_COUNT as u8 + Instruction::OPCODE_COUNT)
        );
    }

    #[test]
    fn ninth_mutation_forks_a_new_species() {
        let mut rng = ChaCha12Rng::seed_from_u64(4);
        let (mut pool, seed) = seeded_pool(&mut rng);
        let species = pool.get(seed).unwrap().parent_handle();

        let mut current = seed;
        for depth in 1..=MAX_MUTATION_DEPTH {
            current = pool.mutate(current, &mut rng).unwrap();
            let gene = pool.get(current).unwrap();
            assert_eq!(gene.parent_handle(), species);
            assert_eq!(gene.mutation_depth(), depth);
        }

        let forked = pool.mutate(current, &mut rng).unwrap();
        let gene = pool.get(forked).unwrap();
        assert_eq!(gene.parent_handle(), current);
        assert_eq!(gene.mutation_depth(), 0);
        assert!(!gene.is_kin(pool.get(current).unwrap()));
    }

    #[test]
    fn mutating_a_missing_gene_allocates_nothing() {
        let mut rng = ChaCha12Rng::seed_from_u64(5);
        let mut pool = GenePool::new();
        assert_eq!(pool.mutate(GeneHandle::new(4), &mut rng), None);
        assert_eq!(pool.slot_count(), 0);
    }

    #[test]
    fn species_count_groups_by_parent_handle() {
        let mut rng = ChaCha12Rng::seed_from_u64(6);
        let mut pool = GenePool::new();
        let a = pool.add_gene(GeneHandle::NONE, &mut rng);
        pool.add_gene(GeneHandle::NONE, &mut rng);
        pool.add_gene(a, &mut rng);
        assert_eq!(pool.live_count(), 3);
        assert_eq!(pool.species_count(), 2);
    }
}
