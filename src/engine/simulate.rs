use super::types::{Relocate, SimulateError};

impl Relocate {
    /// Apply this operation to `items` in place.
    ///
    /// The element is removed first and reinserted before whatever was at
    /// `to` prior to the removal, so a move down lands one slot earlier in
    /// post-removal indexing.
    pub fn apply_to<T>(&self, items: &mut Vec<T>) -> Result<(), SimulateError> {
        self.check(0, items.len())?;
        self.commit(items);
        Ok(())
    }

    fn check(&self, step: usize, len: usize) -> Result<(), SimulateError> {
        if self.from >= len || self.to > len {
            return Err(SimulateError::OutOfRange {
                step,
                op: *self,
                len,
            });
        }
        Ok(())
    }

    fn commit<T>(&self, items: &mut Vec<T>) {
        let item = items.remove(self.from);
        let at = if self.from < self.to {
            self.to - 1
        } else {
            self.to
        };
        items.insert(at, item);
    }
}

/// Replay `ops` against a copy of `items` and return the resulting order.
pub fn apply<T: Clone>(ops: &[Relocate], items: &[T]) -> Result<Vec<T>, SimulateError> {
    let mut out = items.to_vec();
    for (step, op) in ops.iter().enumerate() {
        op.check(step, out.len())?;
        op.commit(&mut out);
    }
    Ok(out)
}
