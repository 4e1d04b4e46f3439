//! Addition problem generation

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::MAX_SUM;

/// One addition problem, `a + b = answer`, with `answer <= 10`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub a: u8,
    pub b: u8,
    pub answer: u8,
}

impl Problem {
    /// Draw a problem with both operands in `[0, 9]` and a sum of at most
    /// ten. Rejection-sampled in a loop; both operands are redrawn on a
    /// reject, matching uniformity over the accepted pairs.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let a: u8 = rng.random_range(0..10);
            let b: u8 = rng.random_range(0..10);
            if a + b <= MAX_SUM {
                return Self { a, b, answer: a + b };
            }
        }
    }
}
