//! Random sources for die draws

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A single draw could not be produced
#[derive(Debug, thiserror::Error)]
#[error("random source failed: {0}")]
pub struct DrawError(String);

impl DrawError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Produces uniform die faces in `[1, sides]`.
///
/// Implementations are shared across concurrent evaluations.
pub trait DieSource: Send + Sync {
    /// Draw one face of a die with `sides` faces (`sides >= 1`)
    fn draw(&self, sides: u32) -> Result<u32, DrawError>;
}

/// Draws from a CSPRNG freshly seeded by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct OsDieSource;

impl DieSource for OsDieSource {
    fn draw(&self, sides: u32) -> Result<u32, DrawError> {
        if sides == 0 {
            return Err(DrawError::new("die has no sides"));
        }

        let mut rng = StdRng::try_from_os_rng().map_err(|e| DrawError::new(e.to_string()))?;
        Ok(rng.random_range(1..=sides))
    }
}

/// Replays a fixed sequence of faces, wrapping around at the end.
///
/// Values are clamped into `[1, sides]` for each draw.
#[derive(Debug)]
pub struct SequenceSource {
    values: Vec<u32>,
    next: AtomicUsize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            next: AtomicUsize::new(0),
        }
    }

    /// Number of draws made so far
    pub fn draws(&self) -> usize {
        self.next.load(Ordering::Relaxed)
    }
}

impl DieSource for SequenceSource {
    fn draw(&self, sides: u32) -> Result<u32, DrawError> {
        if self.values.is_empty() {
            return Err(DrawError::new("sequence is empty"));
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.values.len();
        Ok(self.values[idx].clamp(1, sides.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_source_bounds() {
        let source = OsDieSource;
        for sides in [1, 2, 6, 20, 1000] {
            for _ in 0..200 {
                let face = source.draw(sides).unwrap();
                assert!((1..=sides).contains(&face), "face {} out of 1..={}", face, sides);
            }
        }
    }

    #[test]
    fn test_os_source_covers_faces() {
        let source = OsDieSource;
        let mut seen = [false; 4];
        for _ in 0..1000 {
            seen[(source.draw(4).unwrap() - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_os_source_zero_sides() {
        assert!(OsDieSource.draw(0).is_err());
    }

    #[test]
    fn test_sequence_wraps() {
        let source = SequenceSource::new(vec![3, 5]);
        assert_eq!(source.draw(6).unwrap(), 3);
        assert_eq!(source.draw(6).unwrap(), 5);
        assert_eq!(source.draw(6).unwrap(), 3);
        assert_eq!(source.draws(), 3);
    }

    #[test]
    fn test_sequence_clamps() {
        let source = SequenceSource::new(vec![0, 9]);
        assert_eq!(source.draw(6).unwrap(), 1);
        assert_eq!(source.draw(6).unwrap(), 6);
    }

    #[test]
    fn test_empty_sequence_fails() {
        assert!(SequenceSource::new(Vec::new()).draw(6).is_err());
    }
}
