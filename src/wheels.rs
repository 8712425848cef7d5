//! Wheel bank for the Lorenz SZ42 simulator.
//!
//! Models the machine's 12 pin wheels: 5 chi wheels that step every symbol,
//! 5 psi wheels under limited (motor-controlled) motion, and the 2 motor
//! wheels that drive the limitation. Cam patterns and starting positions
//! are expanded deterministically from a caller seed via [`SplitMix64`],
//! so the same seed yields a bit-identical bank in every implementation.

use tracing::debug;

use crate::error::TunnyError;
use crate::random::splitmix::SplitMix64;

/// Periods of the five chi wheels, in wheel order (chi 1 first).
pub const CHI_PERIODS: [usize; 5] = [41, 31, 29, 26, 23];

/// Periods of the five psi wheels, in wheel order (psi 1 first).
pub const PSI_PERIODS: [usize; 5] = [43, 47, 51, 53, 59];

/// Periods of the two motor wheels: mu1 (steps every symbol) and mu2
/// (steps only when mu1's pin is raised).
pub const MOTOR_PERIODS: [usize; 2] = [61, 37];

/// Positions of all 12 wheels at a point in time, in generation order
/// (chi 1..5, psi 1..5, mu1, mu2).
///
/// Together with the fixed cam patterns this fully determines all future
/// keystream output.
pub type KeyState = [usize; 12];

/// Role of a wheel within the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelRole {
    /// Steps unconditionally every symbol; contributes to the chi sum.
    Chi,
    /// Steps only under motor control; contributes to the psi sum.
    Psi,
    /// First motor wheel; steps unconditionally.
    Motor1,
    /// Second motor wheel; steps when mu1's pin is raised and gates the
    /// psi wheels with its own pin.
    Motor2,
}

/// Immutable cam (pin) pattern of a single wheel.
///
/// One boolean per rotational position; the length is the wheel's period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CamPattern {
    pins: Vec<bool>,
}

impl CamPattern {
    /// Creates a cam pattern from explicit pin settings.
    ///
    /// # Errors
    /// Returns [`TunnyError::WheelConfig`] if `pins` is empty.
    pub fn new(pins: Vec<bool>) -> Result<Self, TunnyError> {
        if pins.is_empty() {
            return Err(TunnyError::WheelConfig {
                reason: "cam pattern must have at least one pin".to_string(),
            });
        }
        Ok(CamPattern { pins })
    }

    /// Draws a cam pattern of `period` pins from the expansion generator.
    ///
    /// Each pin is the low bit of one SplitMix64 output, drawn in position
    /// order. This draw order is part of the seed-expansion contract.
    fn generate(rng: &mut SplitMix64, period: usize) -> Self {
        let pins = (0..period).map(|_| rng.next_bool()).collect();
        CamPattern { pins }
    }

    /// Returns the number of pins (the wheel's period).
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Returns true if the pattern has no pins. Never true for a pattern
    /// built through [`new`](Self::new) or seed expansion.
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Returns the pin setting at the given rotational position.
    pub fn pin_at(&self, position: usize) -> bool {
        self.pins[position % self.pins.len()]
    }
}

/// A single wheel: an immutable cam pattern plus a mutable rotational
/// position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wheel {
    pattern: CamPattern,
    position: usize,
}

impl Wheel {
    /// Creates a wheel from a cam pattern and starting position.
    ///
    /// The position is reduced modulo the period.
    pub fn new(pattern: CamPattern, position: usize) -> Self {
        let position = position % pattern.len();
        Wheel { pattern, position }
    }

    /// Draws a wheel of `period` pins from the expansion generator: first
    /// the cam pattern, then the initial position (`next() % period`).
    fn generate(rng: &mut SplitMix64, period: usize) -> Self {
        let pattern = CamPattern::generate(rng, period);
        let position = rng.next_bounded(period as u64) as usize;
        Wheel { pattern, position }
    }

    /// Advances the wheel by one position, wrapping at the period.
    pub fn step(&mut self) {
        self.position = (self.position + 1) % self.pattern.len();
    }

    /// Returns the pin setting at the current position.
    pub fn pin(&self) -> bool {
        self.pattern.pin_at(self.position)
    }

    /// Returns the current rotational position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the wheel's period (cam pattern length).
    pub fn period(&self) -> usize {
        self.pattern.len()
    }
}

/// The complete set of 12 wheels, grouped by role.
///
/// Owned exclusively by one [`LorenzMachine`](crate::LorenzMachine);
/// independent cipher runs each build their own bank, so concurrent runs
/// cannot interfere.
#[derive(Debug, Clone)]
pub struct WheelBank {
    chi: [Wheel; 5],
    psi: [Wheel; 5],
    motor: [Wheel; 2],
}

impl WheelBank {
    /// Expands a byte-sequence seed into a complete wheel bank.
    ///
    /// The expansion is normative and reproducible across implementations:
    /// the seed bytes are folded with FNV-1a 64 into a [`SplitMix64`]
    /// state, then each wheel in the fixed order chi 1..5, psi 1..5, mu1,
    /// mu2 draws its cam pattern followed by its initial position.
    ///
    /// # Errors
    /// Returns [`TunnyError::InvalidSeed`] if `seed` is empty.
    pub fn generate(seed: &[u8]) -> Result<Self, TunnyError> {
        if seed.is_empty() {
            return Err(TunnyError::InvalidSeed);
        }
        let mut rng = SplitMix64::from_bytes(seed);
        let chi = CHI_PERIODS.map(|p| Wheel::generate(&mut rng, p));
        let psi = PSI_PERIODS.map(|p| Wheel::generate(&mut rng, p));
        let motor = MOTOR_PERIODS.map(|p| Wheel::generate(&mut rng, p));
        let bank = WheelBank { chi, psi, motor };
        bank.validate()?;
        debug!(seed_len = seed.len(), "wheel bank generated from seed");
        Ok(bank)
    }

    /// Expands an integer seed into a complete wheel bank.
    ///
    /// Equivalent to [`generate`](Self::generate) over the big-endian
    /// bytes of `seed`.
    pub fn generate_from_u64(seed: u64) -> Result<Self, TunnyError> {
        Self::generate(&seed.to_be_bytes())
    }

    /// Builds a wheel bank from caller-supplied wheels.
    ///
    /// Intended for fixtures and historically accurate pin settings; the
    /// seeded constructors should be preferred otherwise.
    ///
    /// # Errors
    /// Returns [`TunnyError::WheelConfig`] if any period is duplicated
    /// within a role.
    pub fn from_wheels(
        chi: [Wheel; 5],
        psi: [Wheel; 5],
        motor: [Wheel; 2],
    ) -> Result<Self, TunnyError> {
        let bank = WheelBank { chi, psi, motor };
        bank.validate()?;
        Ok(bank)
    }

    /// Checks the no-duplicate-period-per-role invariant.
    ///
    /// Distinct periods within each role guarantee the combined cycle
    /// length is the product of the individual periods. Zero-length cams
    /// are ruled out by [`CamPattern::new`] before a wheel can exist.
    fn validate(&self) -> Result<(), TunnyError> {
        for (role, wheels) in [
            ("chi", &self.chi[..]),
            ("psi", &self.psi[..]),
            ("motor", &self.motor[..]),
        ] {
            for i in 0..wheels.len() {
                for j in (i + 1)..wheels.len() {
                    if wheels[i].period() == wheels[j].period() {
                        return Err(TunnyError::WheelConfig {
                            reason: format!(
                                "duplicate {} period {}",
                                role,
                                wheels[i].period()
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// XOR of the five chi wheels' pins as a 5-bit value.
    ///
    /// Chi wheel i contributes bit i (chi 1 is the least significant bit).
    pub(crate) fn chi_sum(&self) -> u8 {
        Self::pin_sum(&self.chi)
    }

    /// XOR of the five psi wheels' pins as a 5-bit value, bit order as in
    /// [`chi_sum`](Self::chi_sum).
    pub(crate) fn psi_sum(&self) -> u8 {
        Self::pin_sum(&self.psi)
    }

    fn pin_sum(wheels: &[Wheel; 5]) -> u8 {
        wheels
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, w)| acc | (u8::from(w.pin()) << i))
    }

    /// Steps every chi wheel by one position.
    pub(crate) fn step_chi(&mut self) {
        for wheel in &mut self.chi {
            wheel.step();
        }
    }

    /// Steps every psi wheel by one position.
    pub(crate) fn step_psi(&mut self) {
        for wheel in &mut self.psi {
            wheel.step();
        }
    }

    /// Applies the motor rule: mu1 steps unconditionally; mu2 steps only
    /// if mu1's pin was raised before mu1 stepped.
    ///
    /// Returns mu2's pin after the rule, which gates the psi wheels.
    pub(crate) fn step_motor(&mut self) -> bool {
        let mu1_pin = self.motor[0].pin();
        self.motor[0].step();
        if mu1_pin {
            self.motor[1].step();
        }
        self.motor[1].pin()
    }

    /// Returns the positions of all 12 wheels in generation order.
    pub fn positions(&self) -> KeyState {
        let mut state = [0usize; 12];
        for (i, w) in self.chi.iter().enumerate() {
            state[i] = w.position();
        }
        for (i, w) in self.psi.iter().enumerate() {
            state[5 + i] = w.position();
        }
        state[10] = self.motor[0].position();
        state[11] = self.motor[1].position();
        state
    }

    /// Returns the wheel with the given role and index (index is ignored
    /// for the motor roles).
    pub fn wheel(&self, role: WheelRole, index: usize) -> &Wheel {
        match role {
            WheelRole::Chi => &self.chi[index],
            WheelRole::Psi => &self.psi[index],
            WheelRole::Motor1 => &self.motor[0],
            WheelRole::Motor2 => &self.motor[1],
        }
    }
}
