//! Slot-list chromosome for the weekly timetable GA.
//!
//! # Encoding
//!
//! A chromosome is an ordered list of genes `(unit, slot)`. Unit `i` is the
//! i-th allocation unit (one required period of one subject); a fresh
//! chromosome pairs units with a shuffled copy of the slot space
//! positionally, so gene `i` carries unit `i`.
//!
//! Crossover is single-point and positional; mutation moves one gene to a
//! random cell. Both can create clashes, which [`repair`] removes before a
//! child is scored.

use std::collections::HashSet;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use super::runner::Individual;
use super::AllocationUnit;
use crate::models::{SlotOccupancy, WeeklySlot};

/// One placed allocation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gene {
    /// Index into the problem's allocation units.
    pub unit: usize,
    pub slot: WeeklySlot,
}

/// Weekly timetable chromosome.
///
/// Higher fitness = better schedule (maximization convention).
#[derive(Debug, Clone)]
pub struct TimetableChromosome {
    pub genes: Vec<Gene>,
    pub fitness: f64,
}

impl Individual for TimetableChromosome {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

impl TimetableChromosome {
    /// Wraps genes as an unevaluated chromosome.
    pub fn from_genes(genes: Vec<Gene>) -> Self {
        Self {
            genes,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Pairs units `0..unit_count` with a shuffled slot space.
    ///
    /// Units beyond the slot space are left out.
    pub fn random<R: Rng>(unit_count: usize, days: usize, periods: usize, rng: &mut R) -> Self {
        let mut slots = WeeklySlot::all(days, periods);
        slots.shuffle(rng);
        let genes = (0..unit_count)
            .zip(slots)
            .map(|(unit, slot)| Gene { unit, slot })
            .collect();
        Self::from_genes(genes)
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether there are no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Whether `unit` is placed somewhere.
    pub fn contains_unit(&self, unit: usize) -> bool {
        self.genes.iter().any(|g| g.unit == unit)
    }
}

/// Single-point crossover: `parent1[..split] ++ parent2[split..]`.
///
/// `split` is drawn from `[0, len(parent1)]`; when `parent2` is shorter than
/// `split`, the child is just the prefix.
pub fn single_point_crossover<R: Rng>(
    parent1: &TimetableChromosome,
    parent2: &TimetableChromosome,
    rng: &mut R,
) -> TimetableChromosome {
    let split = rng.random_range(0..=parent1.genes.len());
    let mut genes = parent1.genes[..split].to_vec();
    if let Some(tail) = parent2.genes.get(split..) {
        genes.extend_from_slice(tail);
    }
    TimetableChromosome::from_genes(genes)
}

/// Moves one random gene to a uniformly random cell.
pub fn random_slot_mutation<R: Rng>(
    chromosome: &mut TimetableChromosome,
    days: usize,
    periods: usize,
    rng: &mut R,
) {
    if chromosome.genes.is_empty() || days == 0 || periods == 0 {
        return;
    }
    let idx = rng.random_range(0..chromosome.genes.len());
    chromosome.genes[idx].slot =
        WeeklySlot::new(rng.random_range(0..days), rng.random_range(0..periods));
}

/// Cells already used while scanning a chromosome.
struct WeekOccupancy {
    batch: HashSet<WeeklySlot>,
    faculty: SlotOccupancy<WeeklySlot>,
    batch_exclusive: bool,
    days: usize,
    periods: usize,
}

impl WeekOccupancy {
    fn new(days: usize, periods: usize, batch_exclusive: bool) -> Self {
        Self {
            batch: HashSet::new(),
            faculty: SlotOccupancy::new(),
            batch_exclusive,
            days,
            periods,
        }
    }

    fn is_free(&self, slot: WeeklySlot, faculty: Option<&str>) -> bool {
        if !slot.in_bounds(self.days, self.periods) {
            return false;
        }
        if self.batch_exclusive && self.batch.contains(&slot) {
            return false;
        }
        faculty.map_or(true, |f| !self.faculty.is_taken(slot, f))
    }

    fn occupy(&mut self, slot: WeeklySlot, faculty: Option<&str>) {
        self.batch.insert(slot);
        if let Some(f) = faculty {
            self.faculty.reserve(slot, f);
        }
    }
}

/// Removes clashes from a chromosome.
///
/// A gene clashes when its cell is out of bounds, when its faculty member
/// already teaches in that cell, or (with `batch_exclusive`) when the cell
/// already holds another period. Genes are kept first-come; each clashing
/// gene moves to a random legal cell, or is dropped when none is left.
///
/// Returns the number of genes that clashed.
pub fn repair<R: Rng>(
    chromosome: &mut TimetableChromosome,
    units: &[AllocationUnit],
    days: usize,
    periods: usize,
    batch_exclusive: bool,
    rng: &mut R,
) -> usize {
    let faculty_of =
        |unit: usize| -> Option<&str> { units.get(unit).and_then(|u| u.faculty_id.as_deref()) };

    let mut occupancy = WeekOccupancy::new(days, periods, batch_exclusive);
    let mut clashing = Vec::new();
    for (i, gene) in chromosome.genes.iter().enumerate() {
        let faculty = faculty_of(gene.unit);
        if occupancy.is_free(gene.slot, faculty) {
            occupancy.occupy(gene.slot, faculty);
        } else {
            clashing.push(i);
        }
    }

    if clashing.is_empty() {
        return 0;
    }

    let all_slots = WeeklySlot::all(days, periods);
    let mut dropped = Vec::new();
    for &i in &clashing {
        let faculty = faculty_of(chromosome.genes[i].unit);
        let free: Vec<WeeklySlot> = all_slots
            .iter()
            .copied()
            .filter(|s| occupancy.is_free(*s, faculty))
            .collect();
        match free.choose(rng) {
            Some(&slot) => {
                chromosome.genes[i].slot = slot;
                occupancy.occupy(slot, faculty);
            }
            None => dropped.push(i),
        }
    }
    for i in dropped.into_iter().rev() {
        chromosome.genes.remove(i);
    }

    clashing.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn unit(subject: &str, faculty: Option<&str>) -> AllocationUnit {
        AllocationUnit {
            subject_id: subject.into(),
            subject_name: subject.into(),
            faculty_id: faculty.map(String::from),
            faculty_name: faculty.unwrap_or("Unknown").into(),
        }
    }

    fn gene(unit: usize, day: usize, period: usize) -> Gene {
        Gene {
            unit,
            slot: WeeklySlot::new(day, period),
        }
    }

    #[test]
    fn test_random_chromosome_positional() {
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = TimetableChromosome::random(9, 5, 7, &mut rng);
        assert_eq!(ch.len(), 9);
        for (i, g) in ch.genes.iter().enumerate() {
            assert_eq!(g.unit, i);
            assert!(g.slot.in_bounds(5, 7));
        }
        let distinct: HashSet<WeeklySlot> = ch.genes.iter().map(|g| g.slot).collect();
        assert_eq!(distinct.len(), 9);
        assert_eq!(ch.fitness, f64::NEG_INFINITY);
    }

    #[test]
    fn test_random_truncates_to_slot_space() {
        let mut rng = SmallRng::seed_from_u64(42);
        let ch = TimetableChromosome::random(10, 2, 3, &mut rng);
        assert_eq!(ch.len(), 6);
        assert!(!ch.contains_unit(6));
    }

    #[test]
    fn test_crossover_prefix_suffix() {
        let mut rng = SmallRng::seed_from_u64(7);
        let p1 = TimetableChromosome::from_genes((0..6).map(|u| gene(u, 0, u)).collect());
        let p2 = TimetableChromosome::from_genes((0..6).map(|u| gene(u, 1, u)).collect());
        for _ in 0..20 {
            let child = single_point_crossover(&p1, &p2, &mut rng);
            assert_eq!(child.len(), 6);
            let split = child.genes.iter().take_while(|g| g.slot.day == 0).count();
            assert!(child.genes[..split].iter().all(|g| g.slot.day == 0));
            assert!(child.genes[split..].iter().all(|g| g.slot.day == 1));
            for (i, g) in child.genes.iter().enumerate() {
                assert_eq!(g.unit, i);
            }
        }
    }

    #[test]
    fn test_crossover_unequal_lengths() {
        let mut rng = SmallRng::seed_from_u64(3);
        let p1 = TimetableChromosome::from_genes((0..5).map(|u| gene(u, 0, u)).collect());
        let p2 = TimetableChromosome::from_genes((0..2).map(|u| gene(u, 1, u)).collect());
        for _ in 0..20 {
            let child = single_point_crossover(&p1, &p2, &mut rng);
            assert!(child.len() <= 5);
            assert!(child.len() >= 2);
        }
    }

    #[test]
    fn test_mutation_stays_in_bounds() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ch = TimetableChromosome::random(9, 5, 7, &mut rng);
        for _ in 0..200 {
            random_slot_mutation(&mut ch, 5, 7, &mut rng);
        }
        assert_eq!(ch.len(), 9);
        assert!(ch.genes.iter().all(|g| g.slot.in_bounds(5, 7)));
    }

    #[test]
    fn test_repair_faculty_double_booking() {
        let units = vec![unit("S1", Some("F1")), unit("S2", Some("F1"))];
        let mut ch = TimetableChromosome::from_genes(vec![gene(0, 0, 0), gene(1, 0, 0)]);
        let mut rng = SmallRng::seed_from_u64(42);

        let clashes = repair(&mut ch, &units, 5, 7, false, &mut rng);
        assert_eq!(clashes, 1);
        assert_eq!(ch.genes[0].slot, WeeklySlot::new(0, 0));
        assert_ne!(ch.genes[1].slot, WeeklySlot::new(0, 0));
    }

    #[test]
    fn test_repair_distinct_faculty_share_cell_without_batch_rule() {
        let units = vec![unit("S1", Some("F1")), unit("S2", Some("F2"))];
        let mut ch = TimetableChromosome::from_genes(vec![gene(0, 2, 2), gene(1, 2, 2)]);
        let mut rng = SmallRng::seed_from_u64(42);

        assert_eq!(repair(&mut ch, &units, 5, 7, false, &mut rng), 0);
        assert_eq!(repair(&mut ch, &units, 5, 7, true, &mut rng), 1);
        assert_ne!(ch.genes[0].slot, ch.genes[1].slot);
    }

    #[test]
    fn test_repair_out_of_bounds() {
        let units = vec![unit("S1", None)];
        let mut ch = TimetableChromosome::from_genes(vec![gene(0, 9, 9)]);
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(repair(&mut ch, &units, 5, 7, true, &mut rng), 1);
        assert!(ch.genes[0].slot.in_bounds(5, 7));
    }

    #[test]
    fn test_repair_drops_when_full() {
        let units = vec![unit("S1", Some("F1")), unit("S2", Some("F1"))];
        let mut ch = TimetableChromosome::from_genes(vec![gene(0, 0, 0), gene(1, 0, 0)]);
        let mut rng = SmallRng::seed_from_u64(42);

        let clashes = repair(&mut ch, &units, 1, 1, true, &mut rng);
        assert_eq!(clashes, 1);
        assert_eq!(ch.len(), 1);
        assert!(ch.contains_unit(0));
    }
}
