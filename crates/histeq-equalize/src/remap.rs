//! Pixel remapping through a [`Lut`]

use crate::lut::Lut;
use crate::{EqualizeError, EqualizeResult};

/// Map every sample of `samples` through `lut`.
pub fn remap(samples: &[u8], lut: &Lut) -> Vec<u8> {
    samples.iter().map(|&v| lut.apply(v)).collect()
}

/// Map partition `rank`'s samples `src` through `lut` into `dst`.
///
/// # Errors
///
/// Returns [`EqualizeError::PartitionMismatch`] before writing anything if
/// `dst` does not have the same length as `src`.
pub fn remap_into(rank: usize, src: &[u8], lut: &Lut, dst: &mut [u8]) -> EqualizeResult<()> {
    if src.len() != dst.len() {
        return Err(EqualizeError::PartitionMismatch {
            rank,
            expected: src.len(),
            actual: dst.len(),
        });
    }
    for (out, &v) in dst.iter_mut().zip(src) {
        *out = lut.apply(v);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::histogram::Histogram;

    #[test]
    fn test_remap_matches_lut() {
        let samples = [3u8, 9, 3, 200, 9, 9];
        let lut = Lut::from_histogram(&Histogram::from_samples(&samples));
        let out = remap(&samples, &lut);
        assert_eq!(out.len(), samples.len());
        for (o, s) in out.iter().zip(samples.iter()) {
            assert_eq!(*o, lut.apply(*s));
        }
    }

    #[test]
    fn test_remap_into_and_empty() {
        let lut = Lut::from_histogram(&Histogram::from_samples(&[0, 255]));
        let mut dst = [0u8; 2];
        remap_into(0, &[255, 0], &lut, &mut dst).unwrap();
        assert_eq!(dst, [255, 0]);
        assert!(remap(&[], &lut).is_empty());
    }

    #[test]
    fn test_remap_into_length_mismatch() {
        let lut = Lut::from_histogram(&Histogram::from_samples(&[0, 255]));
        let mut dst = [7u8; 3];
        assert!(matches!(
            remap_into(2, &[255, 0], &lut, &mut dst),
            Err(EqualizeError::PartitionMismatch {
                rank: 2,
                expected: 2,
                actual: 3
            })
        ));
        assert_eq!(dst, [7, 7, 7]);
    }
}
