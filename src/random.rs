use std::{fmt, str::FromStr};

use rand::{rngs::StdRng, Rng};
use serde::Deserialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T, E = SelectError> = std::result::Result<T, E>;

/// Where all of the bot's randomness comes from.
///
/// Production code hands out a fresh [`StdRng`] per invocation, tests hand out
/// a scripted source so that branch outcomes are known ahead of time.
pub trait RandomSource: Send {
    /// Returns a uniformly distributed value in `0..bound`. `bound` is never 0.
    fn below(&mut self, bound: usize) -> usize;
}

impl RandomSource for StdRng {
    fn below(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

pub fn pick_one<'a, T>(rng: &mut dyn RandomSource, pool: &'a [T]) -> Result<&'a T> {
    if pool.is_empty() {
        return Err(SelectError::InvalidArgument("cannot pick from an empty pool"));
    }

    Ok(&pool[rng.below(pool.len())])
}

/// Draws `k` entries without replacement, in the order they were drawn.
///
/// Duplicated entries in `pool` count as separate positions, so the result can
/// contain equal values if the pool does; it never contains the same position twice.
pub fn pick_many<'a, T>(
    rng: &mut dyn RandomSource,
    pool: &'a [T],
    k: usize,
) -> Result<Vec<&'a T>> {
    if pool.is_empty() {
        return Err(SelectError::InvalidArgument("cannot pick from an empty pool"));
    }

    if k > pool.len() {
        return Err(SelectError::InvalidArgument(
            "cannot pick more entries than the pool holds",
        ));
    }

    // partial fisher-yates over positions
    let mut positions: Vec<usize> = (0..pool.len()).collect();
    for i in 0..k {
        let j = i + rng.below(positions.len() - i);
        positions.swap(i, j);
    }

    Ok(positions[..k].iter().map(|&i| &pool[i]).collect())
}

pub fn pick_weighted_boolean(
    rng: &mut dyn RandomSource,
    numerator: u32,
    denominator: u32,
) -> Result<bool> {
    Chance::new(numerator, denominator)?;
    Ok(rng.below(denominator as usize) < numerator as usize)
}

/// A probability written as a fraction, e.g. `1/3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Chance {
    numerator: u32,
    denominator: u32,
}

impl Chance {
    pub const fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if denominator == 0 {
            return Err(SelectError::InvalidArgument("denominator must not be zero"));
        }

        if numerator > denominator {
            return Err(SelectError::InvalidArgument(
                "numerator must not exceed denominator",
            ));
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    pub fn roll(&self, rng: &mut dyn RandomSource) -> bool {
        // validated on construction, so this never falls back
        pick_weighted_boolean(rng, self.numerator, self.denominator).unwrap_or(false)
    }
}

impl Default for Chance {
    fn default() -> Self {
        Self {
            numerator: 1,
            denominator: 3,
        }
    }
}

impl fmt::Display for Chance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for Chance {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (numerator, denominator) = s
            .split_once('/')
            .ok_or(SelectError::InvalidArgument("chance must look like `n/d`"))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| SelectError::InvalidArgument("chance must be made of whole numbers"))
        };

        Self::new(parse(numerator)?, parse(denominator)?)
    }
}

impl TryFrom<String> for Chance {
    type Error = SelectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
