//! Uniform random choice of one follower.

use rand::{rng, RngExt};

use crate::error::ApiError;
use crate::types::FollowerRecord;

/// Uniform index in `[0, len)`, or `None` when there is nothing to pick.
pub fn pick_index(len: usize) -> Option<usize> {
    pick_index_with(len, &mut rng())
}

pub fn pick_index_with<R: RngExt>(len: usize, rng: &mut R) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rng.random_range(0..len))
}

/// Pick one follower uniformly at random.
pub fn pick(followers: &[FollowerRecord]) -> Result<&FollowerRecord, ApiError> {
    pick_with(followers, &mut rng())
}

pub fn pick_with<'a, R: RngExt>(
    followers: &'a [FollowerRecord],
    rng: &mut R,
) -> Result<&'a FollowerRecord, ApiError> {
    let index = pick_index_with(followers.len(), rng).ok_or(ApiError::EmptyResult)?;
    Ok(&followers[index])
}
