use crate::effects::Rng;

/// The vertically-scrolling strip of name slots simulating a slot-machine
/// reel. Labels are decorative filler except the fixed center slot, which
/// carries the revealed assignment during the final spin.
pub struct ReelStrip {
    labels: Vec<String>,
    slot_height: f32,
    placeholder: String,
}

impl ReelStrip {
    pub fn new(slots: usize, slot_height: f32, placeholder: &str) -> Self {
        Self {
            labels: vec![placeholder.to_string(); slots],
            slot_height,
            placeholder: placeholder.to_string(),
        }
    }

    /// Index of the slot the viewport window lands on (the visual center).
    pub fn center_index(&self) -> usize {
        self.labels.len() / 2
    }

    /// Fill every slot from the pool: the pool is repeated to capacity,
    /// shuffled, and written in order. An empty pool restores placeholders.
    pub fn refill(&mut self, pool: &[String], rng: &mut Rng) {
        if pool.is_empty() {
            for label in &mut self.labels {
                *label = self.placeholder.clone();
            }
            return;
        }
        let repeats = self.labels.len().div_ceil(pool.len());
        let mut source: Vec<&String> = Vec::with_capacity(repeats * pool.len());
        for _ in 0..repeats {
            source.extend(pool.iter());
        }
        rng.shuffle(&mut source);
        for (label, name) in self.labels.iter_mut().zip(source) {
            *label = name.clone();
        }
    }

    /// Force the final name into the center slot.
    pub fn place_final(&mut self, name: &str) {
        let idx = self.center_index();
        if let Some(label) = self.labels.get_mut(idx) {
            *label = name.to_string();
        }
    }

    /// Strip offset that aligns the center slot with the viewport window.
    pub fn target_offset(&self) -> f32 {
        -(self.slot_height * self.center_index() as f32)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn starts_with_placeholders() {
        let strip = ReelStrip::new(60, 120.0, "—");
        assert_eq!(strip.len(), 60);
        assert!(strip.labels().iter().all(|l| l == "—"));
    }

    #[test]
    fn refill_is_repeated_permutation() {
        // 6 names into 60 slots: each name must appear exactly 10 times.
        let mut strip = ReelStrip::new(60, 120.0, "—");
        let mut rng = Rng::new(42);
        let names = pool(&["a", "b", "c", "d", "e", "f"]);
        strip.refill(&names, &mut rng);
        for name in &names {
            let count = strip.labels().iter().filter(|l| *l == name).count();
            assert_eq!(count, 10, "{} appeared {} times", name, count);
        }
    }

    #[test]
    fn refill_with_empty_pool_keeps_placeholders() {
        let mut strip = ReelStrip::new(10, 120.0, "—");
        let mut rng = Rng::new(42);
        strip.refill(&pool(&["x"]), &mut rng);
        strip.refill(&[], &mut rng);
        assert!(strip.labels().iter().all(|l| l == "—"));
    }

    #[test]
    fn place_final_lands_in_center() {
        let mut strip = ReelStrip::new(60, 120.0, "—");
        strip.place_final("Marta");
        assert_eq!(strip.labels()[30], "Marta");
    }

    #[test]
    fn target_offset_aligns_center_slot() {
        let strip = ReelStrip::new(60, 120.0, "—");
        assert_eq!(strip.center_index(), 30);
        assert_eq!(strip.target_offset(), -3600.0);
    }
}
