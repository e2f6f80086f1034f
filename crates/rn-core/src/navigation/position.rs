//! Index arithmetic for the linear focus sequence

use super::Direction;

/// Next index after moving one step from `current` in a sequence of `len`
/// entries, wrapping at both ends. `None` only when the sequence is empty.
pub fn wrap_step(current: usize, len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.min(len - 1);
    let next = if direction.is_forward() {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    };
    Some(next)
}

/// Index selected when nothing is focused yet: forward moves land on the
/// first entry, backward moves on the last.
pub fn initial_step(len: usize, direction: Direction) -> Option<usize> {
    if len == 0 {
        None
    } else if direction.is_forward() {
        Some(0)
    } else {
        Some(len - 1)
    }
}
