//! Host-side filler buffers for feeding kernels test input.
//!
//! Allocation goes through `try_reserve_exact`, so a failed reservation
//! comes back as `VizError::Allocation` with the caller's file and line
//! instead of aborting.

use crate::error::VizError;
use crate::prng::Xorshift64;
use crate::status::check_alloc;
use log::trace;

/// `size` bytes of pseudo-random filler: the low byte of successive 31-bit draws.
#[track_caller]
pub fn random_block(size: usize, rng: &mut Xorshift64) -> Result<Vec<u8>, VizError> {
    let mut data = reserve::<u8>(size, size)?;
    data.extend((0..size).map(|_| rng.next_u31() as u8));
    trace!("random_block: {size} bytes");
    Ok(data)
}

/// `count` non-negative pseudo-random 32-bit integers.
#[track_caller]
pub fn random_block_int(count: usize, rng: &mut Xorshift64) -> Result<Vec<i32>, VizError> {
    let bytes = count.saturating_mul(std::mem::size_of::<i32>());
    let mut data = reserve::<i32>(count, bytes)?;
    data.extend((0..count).map(|_| rng.next_u31()));
    trace!("random_block_int: {count} ints");
    Ok(data)
}

#[track_caller]
fn reserve<T>(len: usize, bytes: usize) -> Result<Vec<T>, VizError> {
    let mut data = Vec::new();
    let reserved = data.try_reserve_exact(len).ok();
    check_alloc(reserved, bytes)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_block_has_requested_length() {
        let mut rng = Xorshift64::new(1);
        assert_eq!(random_block(1000, &mut rng).unwrap().len(), 1000);
        assert!(random_block(0, &mut rng).unwrap().is_empty());
    }

    #[test]
    fn random_block_int_is_non_negative() {
        let mut rng = Xorshift64::new(2);
        let ints = random_block_int(4096, &mut rng).unwrap();
        assert_eq!(ints.len(), 4096);
        assert!(ints.iter().all(|&v| v >= 0));
    }

    #[test]
    fn random_block_is_not_constant() {
        let mut rng = Xorshift64::new(3);
        let data = random_block(256, &mut rng).unwrap();
        assert!(data.iter().any(|&b| b != data[0]));
    }

    #[test]
    fn same_seed_same_block() {
        let a = random_block(512, &mut Xorshift64::new(99)).unwrap();
        let b = random_block(512, &mut Xorshift64::new(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn impossible_allocation_reports_callers_location() {
        let mut rng = Xorshift64::new(4);
        let line = line!() + 1;
        let err = random_block_int(usize::MAX / 2, &mut rng).unwrap_err();
        match err {
            VizError::Allocation { location, .. } => {
                assert!(location.file.ends_with("random.rs"), "file: {}", location.file);
                assert_eq!(location.line, line);
            }
            other => panic!("expected Allocation, got {other:?}"),
        }
    }
}
