//! Homogeneous entity storage with deferred removal
//!
//! Entities are flagged dead while a tick is being processed and only
//! removed by `compact`, after every entity has been visited. Indices stay
//! stable for the whole tick.

/// Contiguous store of one entity kind
#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
    dead: Vec<bool>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Pool<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            dead: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a new live entity
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.dead.push(false);
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Flag an entity for removal at the next compaction
    pub fn mark_dead(&mut self, index: usize) {
        if let Some(flag) = self.dead.get_mut(index) {
            *flag = true;
        }
    }

    pub fn is_dead(&self, index: usize) -> bool {
        self.dead.get(index).copied().unwrap_or(false)
    }

    pub fn dead_count(&self) -> usize {
        self.dead.iter().filter(|d| **d).count()
    }

    /// Entities not flagged dead this tick, with their indices
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, &T)> {
        self.items
            .iter()
            .enumerate()
            .filter(move |(i, _)| !self.dead[*i])
    }

    /// Remove every flagged entity, preserving the order of the rest.
    /// Returns the number removed.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        let dead = &self.dead;
        let mut idx = 0;
        // retain visits each element exactly once, in order
        self.items.retain(|_| {
            let keep = !dead[idx];
            idx += 1;
            keep
        });
        self.dead.clear();
        self.dead.resize(self.items.len(), false);
        before - self.items.len()
    }

    /// Drop the `count` oldest entities immediately
    pub fn evict_oldest(&mut self, count: usize) {
        let count = count.min(self.items.len());
        self.items.drain(..count);
        self.dead.drain(..count);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.dead.clear();
    }
}

impl<'a, T> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
