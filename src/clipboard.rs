use serde::Serialize;
use tracing::debug;

/// One history slot. Padding slots (from [`ClipboardRing::ensure_capacity`]
/// or [`ClipboardRing::rebind`]) are not bound to any key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ClipboardSlot {
    pub key_id: Option<usize>,
    pub value: Option<String>,
}

/// Fixed-capacity, most-recent-first history with exact-match dedupe.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClipboardRing {
    slots: Vec<ClipboardSlot>,
}

impl ClipboardRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slots(key_ids: &[usize]) -> Self {
        let mut ring = Self::new();
        ring.initialize_slots(key_ids);
        ring
    }

    /// Rebinds the ring to a new set of clipboard keys.
    ///
    /// A new id keeps the value it had before. Ids that are new to the ring
    /// take the old value at the same position, or nothing.
    pub fn initialize_slots(&mut self, key_ids: &[usize]) {
        let old = std::mem::take(&mut self.slots);
        self.slots = key_ids
            .iter()
            .enumerate()
            .map(|(index, &id)| {
                let value = match old.iter().find(|s| s.key_id == Some(id)) {
                    Some(slot) => slot.value.clone(),
                    None => old.get(index).and_then(|s| s.value.clone()),
                };
                ClipboardSlot {
                    key_id: Some(id),
                    value,
                }
            })
            .collect();
        debug!(
            "Clipboard slots rebuilt: {} -> {} slots",
            old.len(),
            self.slots.len()
        );
    }

    /// Rebinds to `key_ids` like [`initialize_slots`](Self::initialize_slots),
    /// then pads to `min_slots` with unbound slots. Padding slots take the
    /// old value at their position, so history survives layouts with fewer
    /// (or no) clipboard keys.
    pub fn rebind(&mut self, key_ids: &[usize], min_slots: usize) {
        let old = self.slots.clone();
        self.initialize_slots(key_ids);
        let bound = self.slots.len();
        self.slots.extend((bound..min_slots).map(|index| ClipboardSlot {
            key_id: None,
            value: old.get(index).and_then(|s| s.value.clone()),
        }));
    }

    /// Pads with unbound empty slots up to `n`. Never shrinks.
    pub fn ensure_capacity(&mut self, n: usize) {
        if self.slots.len() < n {
            self.slots.resize_with(n, ClipboardSlot::default);
        }
    }

    /// Pushes `text` to the front, evicting the oldest value. Returns false
    /// when nothing changed (no slots, or `text` is already stored).
    pub fn add_entry(&mut self, text: &str) -> bool {
        if self.slots.is_empty() || self.contains(text) {
            return false;
        }
        for i in (1..self.slots.len()).rev() {
            self.slots[i].value = self.slots[i - 1].value.take();
        }
        self.slots[0].value = Some(text.to_string());
        debug!("Clipboard entry added ({} chars)", text.chars().count());
        true
    }

    pub fn contains(&self, text: &str) -> bool {
        self.slots.iter().any(|s| s.value.as_deref() == Some(text))
    }

    pub fn get_entry(&self, key_id: usize) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.key_id == Some(key_id))
            .and_then(|s| s.value.as_deref())
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.value = None;
        }
    }

    pub fn slots(&self) -> &[ClipboardSlot] {
        &self.slots
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Stored values, most recent first.
    pub fn values(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        self.slots.iter().map(|s| s.value.as_deref())
    }
}
