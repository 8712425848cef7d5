//! Lorenz machine: keystream generation and message transformation.
//!
//! Drives one exclusively owned [`WheelBank`] through the SZ42 stepping
//! rule and combines the resulting 5-bit keystream with a symbol stream
//! by XOR. Encryption and decryption are the same operation.

use tracing::debug;

use crate::error::TunnyError;
use crate::wheels::{KeyState, WheelBank};
use crate::{Symbol, SYMBOL_MAX};

/// An instance of a Lorenz SZ42 cipher machine.
///
/// Holds the wheel bank for one encryption or decryption run. Stepping is
/// strictly sequential: symbol N's keystream value depends on the motor
/// state accumulated over symbols 0..N, so there is no skip-ahead. The
/// borrow checker enforces the exclusive-access contract (`next_symbol`
/// and `transform` take `&mut self`).
///
/// # Examples
///
/// ```
/// use tunny::LorenzMachine;
///
/// let mut encoder = LorenzMachine::with_seed(b"shared key").unwrap();
/// let mut decoder = LorenzMachine::with_seed(b"shared key").unwrap();
///
/// let message = vec![8, 5, 12, 12, 24];
/// let ciphertext = encoder.transform(&message).unwrap();
/// assert_ne!(ciphertext, message);
/// assert_eq!(decoder.transform(&ciphertext).unwrap(), message);
/// ```
#[derive(Debug)]
pub struct LorenzMachine {
    bank: WheelBank,
}

impl LorenzMachine {
    /// Creates a machine with a wheel bank expanded from a byte seed.
    ///
    /// # Errors
    /// Returns [`TunnyError::InvalidSeed`] if `seed` is empty.
    pub fn with_seed(seed: &[u8]) -> Result<Self, TunnyError> {
        Ok(Self::from_wheel_bank(WheelBank::generate(seed)?))
    }

    /// Creates a machine with a wheel bank expanded from an integer seed
    /// (big-endian byte equivalence, see [`WheelBank::generate_from_u64`]).
    ///
    /// # Errors
    /// Returns [`TunnyError::InvalidSeed`] if seed expansion fails.
    pub fn with_seed_u64(seed: u64) -> Result<Self, TunnyError> {
        Ok(Self::from_wheel_bank(WheelBank::generate_from_u64(seed)?))
    }

    /// Creates a machine around an existing wheel bank, taking exclusive
    /// ownership of it.
    pub fn from_wheel_bank(bank: WheelBank) -> Self {
        debug!(key_state = ?bank.positions(), "machine assembled");
        LorenzMachine { bank }
    }

    /// Produces the next keystream symbol and advances the wheels.
    ///
    /// Per step, in fixed order:
    /// 1. Emit `chi_sum XOR psi_sum` from the current pin settings.
    /// 2. Step mu1 unconditionally.
    /// 3. Step mu2 only if mu1's pin was raised before step 2.
    /// 4. Step all chi wheels unconditionally.
    /// 5. Step all psi wheels only if mu2's pin (after step 3) is raised.
    ///
    /// Steps 2-5 reproduce the historical limited motion: the psi wheels
    /// stand still on some symbols, which is the structural weakness that
    /// made the real cipher breakable. Stepping them unconditionally would
    /// be a materially different cipher.
    pub fn next_symbol(&mut self) -> Symbol {
        let output = self.bank.chi_sum() ^ self.bank.psi_sum();
        let psi_moves = self.bank.step_motor();
        self.bank.step_chi();
        if psi_moves {
            self.bank.step_psi();
        }
        output
    }

    /// Transforms a message by XOR with the keystream, consuming one
    /// keystream symbol per message symbol in order.
    ///
    /// Used identically for encryption and decryption: transforming a
    /// ciphertext with a fresh machine built from the same seed restores
    /// the plaintext. An empty message returns an empty message without
    /// drawing any keystream.
    ///
    /// # Errors
    /// Returns [`TunnyError::SymbolOutOfRange`] if any input symbol falls
    /// outside [0, 31]. Validation runs before any wheel moves, so a
    /// failed call leaves the machine state untouched and produces no
    /// partial output.
    pub fn transform(&mut self, message: &[Symbol]) -> Result<Vec<Symbol>, TunnyError> {
        if let Some(&bad) = message.iter().find(|&&s| s > SYMBOL_MAX) {
            return Err(TunnyError::SymbolOutOfRange(bad));
        }
        Ok(message.iter().map(|&s| s ^ self.next_symbol()).collect())
    }

    /// Returns the current positions of all 12 wheels.
    pub fn key_state(&self) -> KeyState {
        self.bank.positions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheels::{CamPattern, Wheel, CHI_PERIODS, MOTOR_PERIODS, PSI_PERIODS};

    fn uniform_wheel(period: usize, pin: bool) -> Wheel {
        Wheel::new(CamPattern::new(vec![pin; period]).unwrap(), 0)
    }

    fn fixture_machine(mu1_pin: bool, mu2_pin: bool) -> LorenzMachine {
        let chi = CHI_PERIODS.map(|p| uniform_wheel(p, false));
        let psi = PSI_PERIODS.map(|p| uniform_wheel(p, false));
        let motor = [
            uniform_wheel(MOTOR_PERIODS[0], mu1_pin),
            uniform_wheel(MOTOR_PERIODS[1], mu2_pin),
        ];
        LorenzMachine::from_wheel_bank(WheelBank::from_wheels(chi, psi, motor).unwrap())
    }

    #[test]
    fn test_keystream_deterministic() {
        let mut m1 = LorenzMachine::with_seed(b"determinism").unwrap();
        let mut m2 = LorenzMachine::with_seed(b"determinism").unwrap();
        for _ in 0..500 {
            assert_eq!(m1.next_symbol(), m2.next_symbol());
        }
        assert_eq!(m1.key_state(), m2.key_state());
    }

    #[test]
    fn test_keystream_symbols_in_range() {
        let mut machine = LorenzMachine::with_seed_u64(7).unwrap();
        for _ in 0..1000 {
            assert!(machine.next_symbol() <= SYMBOL_MAX);
        }
    }

    #[test]
    fn test_psi_frozen_when_mu2_all_false() {
        // Limited motion fixture: mu2's cam all-false, so the psi wheels
        // must never advance.
        let mut machine = fixture_machine(true, false);
        let psi_home: Vec<usize> = machine.key_state()[5..10].to_vec();
        for _ in 0..100 {
            machine.next_symbol();
        }
        assert_eq!(&machine.key_state()[5..10], psi_home.as_slice());
        // Chi wheels stepped all 100 symbols regardless.
        assert_eq!(machine.key_state()[0], 100 % CHI_PERIODS[0]);
    }

    #[test]
    fn test_psi_steps_every_symbol_when_motors_all_true() {
        let mut machine = fixture_machine(true, true);
        for n in 1..=10 {
            machine.next_symbol();
            assert_eq!(machine.key_state()[5], n % PSI_PERIODS[0]);
        }
    }

    #[test]
    fn test_transform_roundtrip() {
        let message = vec![0, 1, 2, 30, 31, 17, 4];
        let mut encoder = LorenzMachine::with_seed(b"roundtrip").unwrap();
        let ciphertext = encoder.transform(&message).unwrap();
        let mut decoder = LorenzMachine::with_seed(b"roundtrip").unwrap();
        assert_eq!(decoder.transform(&ciphertext).unwrap(), message);
    }

    #[test]
    fn test_transform_empty_message_draws_no_keystream() {
        let mut machine = LorenzMachine::with_seed(b"empty").unwrap();
        let home = machine.key_state();
        let out = machine.transform(&[]).unwrap();
        assert!(out.is_empty());
        assert_eq!(machine.key_state(), home);
    }

    #[test]
    fn test_transform_rejects_out_of_range_symbol() {
        let mut machine = LorenzMachine::with_seed(b"range").unwrap();
        let home = machine.key_state();
        let err = machine.transform(&[1, 2, 32, 4]).unwrap_err();
        assert_eq!(err, TunnyError::SymbolOutOfRange(32));
        // Validation precedes generation: no wheel moved, no output made.
        assert_eq!(machine.key_state(), home);
    }

    #[test]
    fn test_distinct_seeds_distinct_keystreams() {
        let mut m1 = LorenzMachine::with_seed(b"seed one").unwrap();
        let mut m2 = LorenzMachine::with_seed(b"seed two").unwrap();
        let k1: Vec<u8> = (0..64).map(|_| m1.next_symbol()).collect();
        let k2: Vec<u8> = (0..64).map(|_| m2.next_symbol()).collect();
        assert_ne!(k1, k2);
    }

    #[test]
    fn test_keystream_not_all_zero() {
        let mut machine = LorenzMachine::with_seed(b"nonzero").unwrap();
        assert!((0..64).any(|_| machine.next_symbol() != 0));
    }
}
