//! Search domains.
//!
//! A run draws its genes either from a closed real [`Interval`] or from an
//! ordered [`Alphabet`] of symbols. Both implement [`GeneSampler`], which is
//! what population initialization and resampling mutation consume.

use crate::error::{EvolveError, Result};
use rand::Rng;

/// Draws a single gene uniformly from a domain.
pub trait GeneSampler<G>: Send + Sync {
    /// Samples one gene.
    fn sample<R: Rng>(&self, rng: &mut R) -> G;
}

/// A closed real interval `[lower, upper]` with `lower < upper`.
///
/// # Examples
///
/// ```
/// use u_evolve::ga::Interval;
///
/// let region = Interval::new(-2.0, 2.0).unwrap();
/// assert!(region.contains(0.8));
/// assert!(Interval::new(1.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    /// Creates an interval, failing if the bounds are not finite or
    /// `lower >= upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(EvolveError::InvalidInterval { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `x` lies in the closed interval.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

impl GeneSampler<f64> for Interval {
    /// `u * (upper - lower) + lower` with `u` uniform in `[0, 1)`.
    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.random::<f64>() * self.width() + self.lower
    }
}

/// An ordered, duplicate-free sequence of symbols.
///
/// The position of a symbol in the alphabet is its index; distances
/// between symbols are differences of indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Alphabet<T> {
    symbols: Vec<T>,
}

impl<T: PartialEq> Alphabet<T> {
    /// Creates an alphabet from symbols in order.
    pub fn new(symbols: Vec<T>) -> Result<Self> {
        if symbols.is_empty() {
            return Err(EvolveError::EmptyAlphabet);
        }
        for (index, symbol) in symbols.iter().enumerate() {
            if symbols[..index].contains(symbol) {
                return Err(EvolveError::DuplicateSymbol { index });
            }
        }
        Ok(Self { symbols })
    }

    /// Index of `symbol`, or `None` if it is not in the alphabet.
    pub fn index_of(&self, symbol: &T) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Maps a whole sequence to alphabet indices.
    ///
    /// Fails with [`EvolveError::UnknownSymbol`] on the first symbol that is
    /// not in the alphabet.
    pub fn indices_of(&self, sequence: &[T]) -> Result<Vec<usize>> {
        sequence
            .iter()
            .enumerate()
            .map(|(position, s)| {
                self.index_of(s)
                    .ok_or(EvolveError::UnknownSymbol { position })
            })
            .collect()
    }
}

impl<T> Alphabet<T> {
    /// Symbol at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.symbols.get(index)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; alphabets are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// All symbols in order.
    pub fn symbols(&self) -> &[T] {
        &self.symbols
    }
}

impl Alphabet<char> {
    /// The 26 lowercase latin letters `a..=z`.
    pub fn latin_lowercase() -> Self {
        Self {
            symbols: ('a'..='z').collect(),
        }
    }

    /// Builds an alphabet from the characters of `letters`.
    pub fn from_chars(letters: &str) -> Result<Self> {
        Self::new(letters.chars().collect())
    }
}

impl<T: Clone + Send + Sync> GeneSampler<T> for Alphabet<T> {
    fn sample<R: Rng>(&self, rng: &mut R) -> T {
        self.symbols[rng.random_range(0..self.symbols.len())].clone()
    }
}
