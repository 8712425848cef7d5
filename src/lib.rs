//! Tunny: Lorenz SZ42 teleprinter cipher simulator.
//!
//! Tunny simulates the Lorenz rotor stream cipher ("Tunny" to the
//! Bletchley Park codebreakers) over the 5-bit ITA2 teleprinter alphabet.
//! Twelve pin wheels with irregular ("limited") motion generate a
//! pseudorandom 5-bit keystream that is XORed with the message stream;
//! because XOR is its own inverse, the same operation encrypts and
//! decrypts.
//!
//! This is a simulation of a historically broken cipher, faithful to its
//! statistical weaknesses. It is not a secure primitive and must never be
//! used to protect real data.
//!
//! # Architecture
//!
//! ```text
//! seed bytes
//!     │  SplitMix64 expansion (pinned, cross-implementation reproducible)
//!     ▼
//! WheelBank   (5 chi + 5 psi + 2 motor wheels, fixed historical periods)
//!     │  owned exclusively
//!     ▼
//! LorenzMachine (steps the bank, emits keystream, XORs message symbols)
//!     ▲
//! baudot      (ITA2 text ↔ 5-bit symbol codec)
//! ```
//!
//! # Examples
//!
//! Encrypt and decrypt a message:
//!
//! ```
//! use tunny::{decrypt, encrypt};
//!
//! let ciphertext = encrypt("ATTACK AT DAWN", b"wheel setting of the day").unwrap();
//! let plaintext = decrypt(&ciphertext, b"wheel setting of the day").unwrap();
//! assert_eq!(plaintext, "ATTACK AT DAWN");
//! ```
//!
//! Drive the machine at the symbol level:
//!
//! ```
//! use tunny::LorenzMachine;
//!
//! let mut machine = LorenzMachine::with_seed_u64(42).unwrap();
//! let keystream: Vec<u8> = (0..5).map(|_| machine.next_symbol()).collect();
//! assert!(keystream.iter().all(|&s| s <= 31));
//! ```

#![deny(clippy::all)]

pub mod baudot;
pub mod error;

mod machine;
pub(crate) mod random;
mod wheels;

pub use error::TunnyError;
pub use machine::LorenzMachine;
pub use wheels::{
    CamPattern, KeyState, Wheel, WheelBank, WheelRole, CHI_PERIODS, MOTOR_PERIODS, PSI_PERIODS,
};

/// One 5-bit code unit in the range [0, 31].
pub type Symbol = u8;

/// Largest valid [`Symbol`] value.
pub const SYMBOL_MAX: Symbol = 31;

/// Encrypts text under a seed, yielding ITA2 ciphertext symbols.
///
/// Builds a fresh, never-advanced wheel bank from the seed, encodes the
/// text as ITA2 symbols and XORs them with the keystream. Deterministic:
/// the same text and seed always yield the same ciphertext.
///
/// # Errors
/// Returns [`TunnyError::InvalidSeed`] for an empty seed and
/// [`TunnyError::Encoding`] for text outside the ITA2 alphabet.
///
/// # Examples
///
/// ```
/// use tunny::encrypt;
///
/// let ciphertext = encrypt("HELLO", &42u64.to_be_bytes()).unwrap();
/// assert_eq!(ciphertext.len(), 5);
/// ```
pub fn encrypt(text: &str, seed: &[u8]) -> Result<Vec<Symbol>, TunnyError> {
    let message = baudot::encode(text)?;
    let mut machine = LorenzMachine::with_seed(seed)?;
    machine.transform(&message)
}

/// Decrypts ITA2 ciphertext symbols under a seed, yielding text.
///
/// The inverse of [`encrypt`] for the same seed: a fresh wheel bank
/// reproduces the keystream, the XOR cancels, and the ITA2 decode
/// restores the text.
///
/// # Errors
/// Returns [`TunnyError::InvalidSeed`] for an empty seed and
/// [`TunnyError::SymbolOutOfRange`] if any ciphertext symbol is above 31.
pub fn decrypt(symbols: &[Symbol], seed: &[u8]) -> Result<String, TunnyError> {
    let mut machine = LorenzMachine::with_seed(seed)?;
    let message = machine.transform(symbols)?;
    baudot::decode(&message)
}
