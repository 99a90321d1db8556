//! Short code candidates
//!
//! Pure functions only: nothing here touches storage, so a candidate is
//! never known to be free until the store reserves it.

use std::iter;

use crate::config::{CodeStrategy, GeneratorConfig};
use crate::errors::{LinkVaultError, Result};

const TIMESTAMPED_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const TIMESTAMPED_PREFIX_LEN: usize = 5;

#[derive(Debug, Clone)]
pub struct CodeGenerator {
    alphabet: Vec<u8>,
    length: usize,
    strategy: CodeStrategy,
}

impl CodeGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            alphabet: config.alphabet.as_bytes().to_vec(),
            length: config.length,
            strategy: config.strategy,
        })
    }

    /// Next candidate according to the configured strategy
    pub fn generate(&self) -> String {
        match self.strategy {
            CodeStrategy::Random => self.generate_random(),
            CodeStrategy::Timestamped => Self::generate_timestamped(),
        }
    }

    /// `length` symbols, each drawn independently and uniformly from the
    /// alphabet using the thread-local, OS-seeded RNG.
    pub fn generate_random(&self) -> String {
        draw(&self.alphabet, self.length)
    }

    /// `<5 lowercase letters>-<unix timestamp>`
    pub fn generate_timestamped() -> String {
        format!(
            "{}-{}",
            draw(TIMESTAMPED_LETTERS, TIMESTAMPED_PREFIX_LEN),
            chrono::Utc::now().timestamp()
        )
    }

    /// Number of distinct random-mode codes, `None` on overflow.
    pub fn keyspace_size(&self) -> Option<u128> {
        let exp = u32::try_from(self.length).ok()?;
        (self.alphabet.len() as u128).checked_pow(exp)
    }

    pub fn strategy(&self) -> CodeStrategy {
        self.strategy
    }
}

fn draw(alphabet: &[u8], length: usize) -> String {
    iter::repeat_with(|| alphabet[rand::random_range(0..alphabet.len())] as char)
        .take(length)
        .collect()
}

/// Accept a caller-chosen alias: non-empty, at most `max_length`
/// characters, ASCII letters, digits and `-` only.
pub fn validate_custom(candidate: &str, max_length: usize) -> Result<()> {
    if candidate.is_empty() {
        return Err(LinkVaultError::invalid_alias("Alias must not be empty"));
    }

    let len = candidate.chars().count();
    if len > max_length {
        return Err(LinkVaultError::invalid_alias(format!(
            "Alias '{}' is {} characters long; the maximum is {}",
            candidate, len, max_length
        )));
    }

    if let Some(bad) = candidate
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-'))
    {
        return Err(LinkVaultError::invalid_alias(format!(
            "Alias '{}' contains '{}'; only letters, digits and '-' are allowed",
            candidate, bad
        )));
    }

    Ok(())
}
