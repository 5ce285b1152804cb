//! Scope stack with saved-length levels and per-function frames.

use rio_ir::{Name, NodeId};

#[derive(Copy, Clone, Debug)]
pub(crate) struct Entry {
    pub(crate) name: Name,
    pub(crate) target: NodeId,
    /// Frame depth the declaration belongs to; 0 is the module.
    pub(crate) frame: usize,
}

/// Slot accounting for one function body.
#[derive(Copy, Clone, Debug, Default)]
struct Frame {
    slots: u32,
    peak: u32,
}

/// Saved state for a nested block.
#[derive(Copy, Clone, Debug)]
struct Level {
    entries: usize,
    slots: u32,
}

#[derive(Debug, Default)]
pub(crate) struct Scope {
    entries: Vec<Entry>,
    levels: Vec<Level>,
    frames: Vec<Frame>,
}

impl Scope {
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.levels.clear();
        self.frames.clear();
    }

    /// Depth of the innermost frame; 0 is the module frame.
    pub(crate) fn frame_depth(&self) -> usize {
        self.frames.len().saturating_sub(1)
    }

    pub(crate) fn push_frame(&mut self, slots: u32) {
        self.push_level();
        self.frames.push(Frame { slots, peak: slots });
    }

    /// Close a frame and return its peak slot count.
    pub(crate) fn pop_frame(&mut self) -> u32 {
        let peak = self.frames.pop().map_or(0, |frame| frame.peak);
        self.pop_level();
        peak
    }

    pub(crate) fn push_level(&mut self) {
        let slots = self.frames.last().map_or(0, |frame| frame.slots);
        self.levels.push(Level {
            entries: self.entries.len(),
            slots,
        });
    }

    /// Drop the level's declarations and give its slots back.
    pub(crate) fn pop_level(&mut self) {
        let Some(level) = self.levels.pop() else {
            return;
        };
        self.entries.truncate(level.entries);
        if let Some(frame) = self.frames.last_mut() {
            frame.slots = level.slots;
        }
    }

    pub(crate) fn declare(&mut self, name: Name, target: NodeId) {
        let frame = self.frame_depth();
        self.entries.push(Entry {
            name,
            target,
            frame,
        });
    }

    /// Next free slot in the innermost frame.
    pub(crate) fn claim_slot(&mut self) -> u32 {
        let Some(frame) = self.frames.last_mut() else {
            return 0;
        };
        let slot = frame.slots;
        frame.slots += 1;
        frame.peak = frame.peak.max(frame.slots);
        slot
    }

    /// Slots in use in the innermost frame.
    pub(crate) fn slots(&self) -> u32 {
        self.frames.last().map_or(0, |frame| frame.slots)
    }

    /// Move the innermost frame's next free slot. The peak is kept.
    pub(crate) fn reset_slots(&mut self, slots: u32) {
        if let Some(frame) = self.frames.last_mut() {
            frame.slots = slots;
        }
    }

    /// Innermost declaration of `name`.
    pub(crate) fn find(&self, name: Name) -> Option<Entry> {
        self.entries.iter().rev().find(|entry| entry.name == name).copied()
    }
}
