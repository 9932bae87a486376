//! Synthetic RPM generation
//!
//! [`RpmGenerator`] draws one reading per tick from a weighted flight profile:
//! a uniform draw `p` in [0, 1) picks a band slot by cumulative weight, then
//! an RPM is drawn uniformly within that slot's range and converted to rad/s.
//!
//! Slot ranges are taken from the shared band table rather than restated
//! here, so a generated RPM always classifies into the band its slot names.
//! The random generator is injected, which lets tests run with a fixed seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use thiserror::Error;

use crate::engine::angular_speed_from_rpm;
use crate::types::thresholds::profile_weights;
use crate::types::{range_of, PowerBand};

/// Tolerance on the profile weight total
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

// ============================================================================
// Source Trait
// ============================================================================

/// Anything that can feed the classifier one angular speed reading per tick.
pub trait AngularSpeedSource {
    /// Next reading in rad/s
    fn sample(&mut self) -> f64;

    /// Human-readable name for logging
    fn source_name(&self) -> &str;
}

// ============================================================================
// Flight Profile
// ============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("Flight profile has no slots")]
    Empty,

    #[error("Weight for {0} must be finite and non-negative, got {1}")]
    InvalidWeight(PowerBand, f64),

    #[error("Profile weights must sum to 1.0, got {0}")]
    WeightSum(f64),

    #[error("Sample ceiling {1} for {0} is below the band minimum")]
    EmptyRange(PowerBand, f64),
}

/// Share of ticks spent in one band, and how high within it to sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSlot {
    pub band: PowerBand,
    pub weight: f64,
    /// Upper RPM to sample, clamped to the band's own maximum
    pub ceiling_rpm: f64,
}

impl ProfileSlot {
    pub const fn new(band: PowerBand, weight: f64) -> Self {
        Self {
            band,
            weight,
            ceiling_rpm: f64::INFINITY,
        }
    }

    pub const fn with_ceiling(mut self, ceiling_rpm: f64) -> Self {
        self.ceiling_rpm = ceiling_rpm;
        self
    }

    /// Inclusive RPM interval sampled for this slot
    #[allow(clippy::cast_precision_loss)]
    pub fn sample_bounds(&self) -> (f64, f64) {
        let range = range_of(self.band);
        let low = range.min_rpm as f64;
        let high = (range.max_rpm as f64).min(self.ceiling_rpm);
        (low, high)
    }
}

#[derive(Debug, Clone)]
struct WeightedSlot {
    slot: ProfileSlot,
    cumulative: f64,
    rpm: Uniform<f64>,
}

/// Ordered slots with precomputed cumulative weights.
#[derive(Debug, Clone)]
pub struct FlightProfile {
    slots: Vec<WeightedSlot>,
}

impl FlightProfile {
    pub fn new(slots: Vec<ProfileSlot>) -> Result<Self, ProfileError> {
        if slots.is_empty() {
            return Err(ProfileError::Empty);
        }
        for slot in &slots {
            if !slot.weight.is_finite() || slot.weight < 0.0 {
                return Err(ProfileError::InvalidWeight(slot.band, slot.weight));
            }
            let (low, high) = slot.sample_bounds();
            if high.is_nan() || high < low {
                return Err(ProfileError::EmptyRange(slot.band, slot.ceiling_rpm));
            }
        }
        let total: f64 = slots.iter().map(|slot| slot.weight).sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ProfileError::WeightSum(total));
        }
        Ok(Self::from_checked(slots))
    }

    /// 5/15/25/35/12/6/2 % across PowerOff..OverLimit
    pub fn standard() -> Self {
        Self::from_checked(vec![
            ProfileSlot::new(PowerBand::PowerOff, profile_weights::POWER_OFF)
                .with_ceiling(profile_weights::BELOW_IDLE_SAMPLE_CEILING_RPM),
            ProfileSlot::new(PowerBand::Idle, profile_weights::IDLE),
            ProfileSlot::new(PowerBand::Climb, profile_weights::CLIMB),
            ProfileSlot::new(PowerBand::Cruise, profile_weights::CRUISE),
            ProfileSlot::new(PowerBand::Caution, profile_weights::CAUTION),
            ProfileSlot::new(PowerBand::RedLine, profile_weights::RED_LINE),
            ProfileSlot::new(PowerBand::OverLimit, profile_weights::OVER_LIMIT)
                .with_ceiling(profile_weights::OVERLIMIT_SAMPLE_CEILING_RPM),
        ])
    }

    /// Spend every tick in a single band
    pub fn constant(band: PowerBand) -> Self {
        let ceiling = match band {
            PowerBand::PowerOff => profile_weights::BELOW_IDLE_SAMPLE_CEILING_RPM,
            _ => profile_weights::OVERLIMIT_SAMPLE_CEILING_RPM,
        };
        Self::from_checked(vec![ProfileSlot::new(band, 1.0).with_ceiling(ceiling)])
    }

    /// Slots must already have non-empty ranges
    fn from_checked(slots: Vec<ProfileSlot>) -> Self {
        let mut cumulative = 0.0;
        let slots = slots
            .into_iter()
            .map(|slot| {
                cumulative += slot.weight;
                let (low, high) = slot.sample_bounds();
                WeightedSlot {
                    slot,
                    cumulative,
                    rpm: Uniform::new_inclusive(low, high),
                }
            })
            .collect();
        Self { slots }
    }

    /// Slot chosen by a draw `p` in [0, 1): the first whose cumulative weight exceeds `p`.
    fn select(&self, p: f64) -> &WeightedSlot {
        let last = self.slots.len() - 1;
        self.slots
            .iter()
            .find(|s| p < s.cumulative)
            .unwrap_or(&self.slots[last])
    }

    pub fn slots(&self) -> impl Iterator<Item = &ProfileSlot> {
        self.slots.iter().map(|s| &s.slot)
    }

    /// Configured weight of a band (0 when the profile has no slot for it)
    pub fn weight_of(&self, band: PowerBand) -> f64 {
        self.slots
            .iter()
            .filter(|s| s.slot.band == band)
            .map(|s| s.slot.weight)
            .sum()
    }
}

impl Default for FlightProfile {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// RPM Generator
// ============================================================================

/// Weighted random RPM source.
pub struct RpmGenerator<R: Rng = StdRng> {
    rng: R,
    profile: FlightProfile,
    samples: u64,
}

impl RpmGenerator<StdRng> {
    /// Standard profile, seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), FlightProfile::standard())
    }

    /// Standard profile with a reproducible seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), FlightProfile::standard())
    }

    /// Reproducible when a seed is given, entropy-seeded otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl<R: Rng> RpmGenerator<R> {
    pub const fn new(rng: R, profile: FlightProfile) -> Self {
        Self {
            rng,
            profile,
            samples: 0,
        }
    }

    /// Draw a slot and an RPM inside it
    pub fn sample_rpm(&mut self) -> (PowerBand, f64) {
        let p: f64 = self.rng.gen();
        let slot = self.profile.select(p);
        let rpm = slot.rpm.sample(&mut self.rng);
        self.samples += 1;
        (slot.slot.band, rpm)
    }

    pub const fn profile(&self) -> &FlightProfile {
        &self.profile
    }

    pub const fn samples(&self) -> u64 {
        self.samples
    }
}

impl<R: Rng> AngularSpeedSource for RpmGenerator<R> {
    fn sample(&mut self) -> f64 {
        let (band, rpm) = self.sample_rpm();
        let omega = angular_speed_from_rpm(rpm);
        tracing::trace!(slot = %band, rpm, omega, "Sampled engine speed");
        omega
    }

    fn source_name(&self) -> &str {
        "weighted-profile"
    }
}

// ============================================================================
// Scripted Source
// ============================================================================

/// Replays a fixed list of RPM values, cycling when exhausted.
///
/// An empty script reads as a stopped engine.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    rpms: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    pub fn from_rpms(rpms: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rpms: rpms.into_iter().collect(),
            position: 0,
        }
    }

    /// The same RPM on every tick
    pub fn constant(rpm: f64) -> Self {
        Self::from_rpms([rpm])
    }
}

impl AngularSpeedSource for SequenceSource {
    fn sample(&mut self) -> f64 {
        if self.rpms.is_empty() {
            return 0.0;
        }
        let rpm = self.rpms[self.position % self.rpms.len()];
        self.position += 1;
        angular_speed_from_rpm(rpm)
    }

    fn source_name(&self) -> &str {
        "sequence"
    }
}
