//! Unique target naming for generated jobs.
//!
//! Every job a target emits gets its own id of the form `<target>_<suffix>`
//! where the suffix is six lowercase hex characters, so jobs sharing a stage
//! name never clash.

use rand::Rng;

/// Number of hex characters in a generated suffix.
pub const SUFFIX_LEN: usize = 6;

/// Produces unique target ids for generated jobs.
pub trait TargetNamer {
    /// Make a new id derived from `base`.
    fn make_unique(&mut self, base: &str) -> String;
}

/// Namer drawing each suffix digit independently at random.
///
/// Stateless between calls. Issued names are not checked against each other,
/// so two calls may collide with probability about 1 in 2^24.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomNamer;

impl RandomNamer {
    /// Create a new random namer.
    pub fn new() -> Self {
        Self
    }
}

impl TargetNamer for RandomNamer {
    fn make_unique(&mut self, base: &str) -> String {
        format!("{}_{}", base, random_hex(SUFFIX_LEN))
    }
}

/// Namer numbering ids from a counter.
///
/// Ids are unique for as long as the namer lives; pipelines create one per
/// target invocation.
#[derive(Debug, Default, Clone)]
pub struct SequentialNamer {
    next: u64,
}

impl SequentialNamer {
    /// Create a namer starting at zero.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Create a namer starting at `start`.
    pub fn starting_at(start: u64) -> Self {
        Self { next: start }
    }
}

impl TargetNamer for SequentialNamer {
    fn make_unique(&mut self, base: &str) -> String {
        let n = self.next;
        self.next += 1;
        format!("{}_{:0width$x}", base, n, width = SUFFIX_LEN)
    }
}

fn random_hex(count: usize) -> String {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let digit: u32 = rng.random_range(0..16);
            char::from_digit(digit, 16).unwrap_or('0')
        })
        .collect()
}
