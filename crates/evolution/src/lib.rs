//! Differential-evolution global minimizer for bounded black-box objectives.
//!
//! Implements the `best1bin` strategy with Latin-hypercube initialisation, per-generation
//! dithered mutation, and immediate best-member updates. The population lives in the unit
//! hypercube and is rescaled to the caller's bounds before each objective call, so the
//! objective only ever sees in-bounds points.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Tuning knobs for the search. Defaults mirror the usual SciPy settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionSettings {
    /// Population size is this multiple of the problem dimension.
    pub population_multiplier: usize,
    pub max_generations: usize,
    /// Relative convergence tolerance on the population energy spread.
    pub tolerance: f64,
    /// Absolute convergence tolerance on the population energy spread.
    pub absolute_tolerance: f64,
    /// Differential weight is drawn uniformly from this range once per generation.
    pub mutation: (f64, f64),
    /// Crossover probability.
    pub recombination: f64,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for EvolutionSettings {
    fn default() -> Self {
        Self {
            population_multiplier: 15,
            max_generations: 1_000,
            tolerance: 0.01,
            absolute_tolerance: 0.0,
            mutation: (0.5, 1.0),
            recombination: 0.7,
            seed: None,
        }
    }
}

/// Per-generation progress snapshot handed to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub generation: usize,
    pub best_energy: f64,
    pub mean_energy: f64,
    pub energy_spread: f64,
    pub evaluations: usize,
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Converged,
    MaxGenerations,
}

impl Termination {
    pub fn message(self) -> &'static str {
        match self {
            Termination::Converged => "Optimization terminated successfully.",
            Termination::MaxGenerations => "Maximum number of iterations has been exceeded.",
        }
    }
}

/// Best point found by the search.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub x: Vec<f64>,
    pub energy: f64,
    pub evaluations: usize,
    pub generations: usize,
    pub termination: Termination,
}

impl Minimum {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    pub fn message(&self) -> &'static str {
        self.termination.message()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EvolutionError {
    #[error("search space has no dimensions")]
    EmptyBounds,
    #[error("bound {index} is invalid: lower {lower} must be finite and below upper {upper}")]
    InvalidBounds { index: usize, lower: f64, upper: f64 },
    #[error("population of {size} members is too small; at least 4 are required")]
    PopulationTooSmall { size: usize },
    #[error("mutation range ({0}, {1}) must satisfy 0 <= lo <= hi <= 2")]
    InvalidMutation(f64, f64),
    #[error("recombination {0} must lie in [0, 1]")]
    InvalidRecombination(f64),
    #[error("convergence tolerances must be non-negative")]
    InvalidTolerance,
}

/// Minimise `objective` over the box `bounds`.
pub fn minimize<F>(
    objective: F,
    bounds: &[(f64, f64)],
    settings: &EvolutionSettings,
) -> Result<Minimum, EvolutionError>
where
    F: Fn(&[f64]) -> f64,
{
    minimize_with_observer(objective, bounds, settings, |_| {})
}

/// Minimise `objective` over the box `bounds`, reporting after every generation.
pub fn minimize_with_observer<F, O>(
    objective: F,
    bounds: &[(f64, f64)],
    settings: &EvolutionSettings,
    mut observer: O,
) -> Result<Minimum, EvolutionError>
where
    F: Fn(&[f64]) -> f64,
    O: FnMut(&GenerationReport),
{
    validate(bounds, settings)?;

    let dimension = bounds.len();
    let size = settings.population_multiplier * dimension;
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut population = latin_hypercube(&mut rng, size, dimension);
    let mut energies: Vec<f64> = population
        .iter()
        .map(|member| objective(&scale(member, bounds)))
        .collect();
    let mut evaluations = size;
    let mut best = index_of_min(&energies);

    let mut termination = Termination::MaxGenerations;
    let mut generations = 0;
    let mut trial = vec![0.0; dimension];

    for generation in 1..=settings.max_generations {
        generations = generation;
        let weight = rng.gen_range(settings.mutation.0..=settings.mutation.1);

        for candidate in 0..size {
            let (r0, r1) = pick_two_others(&mut rng, size, candidate);
            let fill = rng.gen_range(0..dimension);
            for k in 0..dimension {
                trial[k] = if k == fill || rng.gen_bool(settings.recombination) {
                    let mutant =
                        population[best][k] + weight * (population[r0][k] - population[r1][k]);
                    mutant.clamp(0.0, 1.0)
                } else {
                    population[candidate][k]
                };
            }

            let energy = objective(&scale(&trial, bounds));
            evaluations += 1;
            if energy <= energies[candidate] {
                population[candidate].copy_from_slice(&trial);
                energies[candidate] = energy;
                if energy <= energies[best] {
                    best = candidate;
                }
            }
        }

        let (mean, spread) = mean_and_spread(&energies);
        observer(&GenerationReport {
            generation,
            best_energy: energies[best],
            mean_energy: mean,
            energy_spread: spread,
            evaluations,
        });

        if spread <= settings.absolute_tolerance + settings.tolerance * mean.abs() {
            termination = Termination::Converged;
            break;
        }
    }

    Ok(Minimum {
        x: scale(&population[best], bounds),
        energy: energies[best],
        evaluations,
        generations,
        termination,
    })
}

fn validate(bounds: &[(f64, f64)], settings: &EvolutionSettings) -> Result<(), EvolutionError> {
    if bounds.is_empty() {
        return Err(EvolutionError::EmptyBounds);
    }
    for (index, &(lower, upper)) in bounds.iter().enumerate() {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(EvolutionError::InvalidBounds {
                index,
                lower,
                upper,
            });
        }
    }
    let size = settings.population_multiplier * bounds.len();
    if size < 4 {
        return Err(EvolutionError::PopulationTooSmall { size });
    }
    let (lo, hi) = settings.mutation;
    if !(0.0 <= lo && lo <= hi && hi <= 2.0) {
        return Err(EvolutionError::InvalidMutation(lo, hi));
    }
    if !(0.0..=1.0).contains(&settings.recombination) {
        return Err(EvolutionError::InvalidRecombination(settings.recombination));
    }
    if !(settings.tolerance >= 0.0 && settings.absolute_tolerance >= 0.0) {
        return Err(EvolutionError::InvalidTolerance);
    }
    Ok(())
}

/// One stratified sample per population slot in every dimension.
fn latin_hypercube(rng: &mut StdRng, size: usize, dimension: usize) -> Vec<Vec<f64>> {
    let segment = 1.0 / size as f64;
    let mut population = vec![vec![0.0; dimension]; size];
    let mut order: Vec<usize> = (0..size).collect();
    for k in 0..dimension {
        order.shuffle(rng);
        for (member, &slot) in population.iter_mut().zip(&order) {
            member[k] = (slot as f64 + rng.gen_range(0.0..1.0)) * segment;
        }
    }
    population
}

fn scale(unit: &[f64], bounds: &[(f64, f64)]) -> Vec<f64> {
    unit.iter()
        .zip(bounds)
        .map(|(u, &(lower, upper))| lower + u * (upper - lower))
        .collect()
}

/// Two distinct member indices, both different from `exclude`.
fn pick_two_others(rng: &mut StdRng, size: usize, exclude: usize) -> (usize, usize) {
    let picks = rand::seq::index::sample(rng, size - 1, 2);
    let shift = |j: usize| if j >= exclude { j + 1 } else { j };
    (shift(picks.index(0)), shift(picks.index(1)))
}

fn index_of_min(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold(0, |best, (i, &v)| if v < values[best] { i } else { best })
}

fn mean_and_spread(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
