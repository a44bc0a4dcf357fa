//! Spawn Manager
//!
//! Procedural x placement with minimum-separation constraints. Every search
//! is bounded: when no valid slot turns up within the attempt budget the
//! placement is skipped, never retried forever.

use rand::Rng;

use crate::tuning::SpawnTuning;

/// Fallback boss distance when a level somehow has no boss
const NO_BOSS_LOOKAHEAD: f32 = 2000.0;

/// Places replacement enemies between the character and the boss
///
/// Stateless apart from its limits: the live enemy set passed in is the
/// only placement history that matters.
#[derive(Debug, Clone)]
pub struct SpawnManager {
    pub margin: f32,
    pub min_gap: f32,
    pub max_attempts: u32,
}

impl SpawnManager {
    pub fn new(tuning: &SpawnTuning) -> Self {
        Self {
            margin: tuning.margin,
            min_gap: tuning.min_gap,
            max_attempts: tuning.max_attempts,
        }
    }

    /// Boss x, or a point ahead of the character when there is none
    pub fn boss_x_or_ahead(boss_x: Option<f32>, character_x: f32) -> f32 {
        boss_x.unwrap_or(character_x + NO_BOSS_LOOKAHEAD)
    }

    /// Random x in `[character_x + margin, boss_x - margin]`
    ///
    /// `None` when the corridor is empty.
    pub fn compute_placement(
        &self,
        rng: &mut impl Rng,
        character_x: f32,
        boss_x: f32,
    ) -> Option<f32> {
        let lo = character_x + self.margin;
        let hi = boss_x - self.margin;
        if lo > hi {
            return None;
        }
        Some(rng.random_range(lo..=hi))
    }

    /// `candidate` keeps at least `min_gap` from every existing x
    pub fn is_separated(candidate: f32, existing: &[f32], min_gap: f32) -> bool {
        existing.iter().all(|&x| (candidate - x).abs() >= min_gap)
    }

    /// Find up to `n` separated positions in the character-boss corridor
    ///
    /// Positions placed earlier in the same call count as existing. An
    /// enemy whose search exhausts the attempt budget is simply skipped.
    pub fn spawn_replacements(
        &self,
        n: usize,
        character_x: f32,
        boss_x: f32,
        existing: &[f32],
        rng: &mut impl Rng,
    ) -> Vec<f32> {
        let mut taken = existing.to_vec();
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            match self.find_slot(rng, character_x, boss_x, &taken) {
                Some(x) => {
                    log::debug!("Spawn placed at x={:.0}", x);
                    taken.push(x);
                    out.push(x);
                }
                None => {
                    log::warn!(
                        "No spawn slot after {} attempts between x={:.0} and x={:.0}",
                        self.max_attempts,
                        character_x,
                        boss_x
                    );
                }
            }
        }
        out
    }

    fn find_slot(
        &self,
        rng: &mut impl Rng,
        character_x: f32,
        boss_x: f32,
        taken: &[f32],
    ) -> Option<f32> {
        for _ in 0..self.max_attempts {
            let candidate = self.compute_placement(rng, character_x, boss_x)?;
            if Self::is_separated(candidate, taken, self.min_gap) {
                return Some(candidate);
            }
        }
        None
    }

    /// Level-start placement of `count` enemies inside `band`
    ///
    /// Each candidate must clear every earlier one by a gap drawn fresh
    /// from `gap_range` per comparison. When the bounded search fails the
    /// enemy still appears at an unconstrained x in the band.
    pub fn initial_placement(
        &self,
        count: usize,
        band: (f32, f32),
        gap_range: (f32, f32),
        rng: &mut impl Rng,
    ) -> Vec<f32> {
        let mut out: Vec<f32> = Vec::with_capacity(count);
        for _ in 0..count {
            let mut chosen = None;
            for _ in 0..self.max_attempts {
                let candidate = draw(rng, band);
                let clear = out
                    .iter()
                    .all(|&x| (candidate - x).abs() >= draw(rng, gap_range));
                if clear {
                    chosen = Some(candidate);
                    break;
                }
            }
            let x = chosen.unwrap_or_else(|| {
                log::debug!("Crowded band {:?}, placing unconstrained", band);
                draw(rng, band)
            });
            out.push(x);
        }
        out
    }
}

/// Uniform draw in `[lo, hi)`, degenerate ranges collapse to `lo`
pub(crate) fn draw(rng: &mut impl Rng, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}

/// Scatter `count` positions over `[0, span)` at least `min_gap` apart
///
/// Bounded like enemy placement: a position that cannot be separated
/// within `max_attempts` draws is dropped.
pub fn scatter(
    count: usize,
    span: f32,
    min_gap: f32,
    max_attempts: u32,
    rng: &mut impl Rng,
) -> Vec<f32> {
    let mut out: Vec<f32> = Vec::with_capacity(count);
    for _ in 0..count {
        let found = (0..max_attempts)
            .map(|_| draw(rng, (0.0, span)))
            .find(|&x| SpawnManager::is_separated(x, &out, min_gap));
        match found {
            Some(x) => out.push(x),
            None => log::warn!("Could not scatter item {} of {}", out.len() + 1, count),
        }
    }
    out
}
