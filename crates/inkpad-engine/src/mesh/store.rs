use super::InkVertex;

/// Vertex count each store preallocates; a working set large enough for a
/// dense signature without reallocation.
pub const DEFAULT_VERTEX_BUDGET: usize = 100_000;

/// Append-only vertex store backing one logical shape.
///
/// Draw calls consume the live region `[0, len)`; `clear` resets the cursor
/// without releasing capacity. The budget is soft: crossing it logs once and
/// the store keeps growing. Appends with a NaN or infinite coordinate are
/// dropped so one corrupt sample cannot poison the strip.
#[derive(Debug)]
pub struct VertexStore {
    verts: Vec<InkVertex>,
    budget: usize,
    warned_over_budget: bool,
}

impl VertexStore {
    pub fn new() -> Self {
        Self::with_budget(DEFAULT_VERTEX_BUDGET)
    }

    pub fn with_budget(budget: usize) -> Self {
        Self {
            verts: Vec::with_capacity(budget),
            budget,
            warned_over_budget: false,
        }
    }

    /// Appends one vertex unless a coordinate is non-finite.
    pub fn push(&mut self, x: f32, y: f32) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        if self.verts.len() == self.budget && !self.warned_over_budget {
            log::warn!(
                "vertex store grew past its budget of {} vertices",
                self.budget
            );
            self.warned_over_budget = true;
        }
        self.verts.push(InkVertex::new(x, y));
    }

    /// Resets the live count to zero, keeping the allocation.
    pub fn clear(&mut self) {
        self.verts.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[InkVertex] {
        &self.verts
    }

    #[inline]
    pub fn budget(&self) -> usize {
        self.budget
    }
}

impl Default for VertexStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_appends_in_order() {
        let mut store = VertexStore::with_budget(8);
        store.push(0.1, 0.2);
        store.push(0.3, 0.4);
        assert_eq!(store.len(), 2);
        assert_eq!(store.vertices()[0], InkVertex::new(0.1, 0.2));
        assert_eq!(store.vertices()[1], InkVertex::new(0.3, 0.4));
    }

    #[test]
    fn non_finite_coordinates_are_dropped() {
        let mut store = VertexStore::with_budget(8);
        store.push(f32::NAN, 0.0);
        store.push(0.0, f32::INFINITY);
        store.push(f32::NEG_INFINITY, f32::NAN);
        assert!(store.is_empty());

        store.push(0.5, -0.5);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut store = VertexStore::with_budget(16);
        for i in 0..10 {
            store.push(i as f32 * 0.01, 0.0);
        }
        let cap = store.verts.capacity();
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.verts.capacity(), cap);
    }

    #[test]
    fn budget_is_soft() {
        let mut store = VertexStore::with_budget(4);
        for i in 0..10 {
            store.push(i as f32 * 0.01, 0.0);
        }
        // All ten landed even though the budget is four.
        assert_eq!(store.len(), 10);
        assert_eq!(store.budget(), 4);
    }
}
