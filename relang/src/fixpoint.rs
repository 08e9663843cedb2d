use std::collections::BTreeSet;

/// Grows `set` with the elements produced by `step` until an iteration adds nothing new.
///
/// Termination is decided by comparing successive sets for equality.
pub(crate) fn fixpoint<T: Ord + Clone>(
    mut set: BTreeSet<T>,
    step: impl Fn(&BTreeSet<T>) -> BTreeSet<T>,
) -> BTreeSet<T> {
    let mut iterations = 1usize;
    loop {
        let mut next = set.clone();
        next.extend(step(&set));
        if next == set {
            log::trace!(
                "fixpoint of {} elements after {iterations} iterations",
                set.len()
            );
            return set;
        }
        set = next;
        iterations += 1;
    }
}
