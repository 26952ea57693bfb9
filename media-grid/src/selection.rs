//! Multi-select state and the layout mode derived from it.
//!
//! Transitions do not touch the view. They return the [`Effect`]s the
//! presenter has to carry out.

use crate::config::PickerVariant;
use crate::layout::LayoutMode;
use crate::models::{AssetId, PhotoAsset};
use std::collections::HashMap;

/// Side effect requested by a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Recompute every frame before the next paint
    Relayout,
    /// Bring the entry at `index` into view
    ScrollIntoView { index: usize, animated: bool },
    /// The send command label depends on the selection count
    RefreshSendTitle,
    /// Hand the current camera handle to the camera slot again
    RebindCamera,
}

/// Ordered set of selected assets; order is selection order
///
/// Removal leaves a hole that is compacted once holes outnumber members,
/// so toggles stay amortized O(1).
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    order: Vec<Option<PhotoAsset>>,
    positions: HashMap<AssetId, usize>,
}

impl SelectionSet {
    pub fn contains(&self, id: &AssetId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhotoAsset> {
        self.order.iter().flatten()
    }

    /// Selected assets in selection order
    pub fn assets(&self) -> Vec<PhotoAsset> {
        self.iter().cloned().collect()
    }

    /// Adds or removes `asset`; returns whether the set is now empty
    pub fn toggle(&mut self, asset: &PhotoAsset) -> bool {
        match self.positions.remove(&asset.id) {
            Some(position) => {
                self.order[position] = None;
                if self.order.len() > 2 * self.positions.len() + 8 {
                    self.compact();
                }
            }
            None => {
                self.positions.insert(asset.id.clone(), self.order.len());
                self.order.push(Some(asset.clone()));
            }
        }
        self.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.positions.clear();
    }

    fn compact(&mut self) {
        self.order.retain(Option::is_some);
        for (position, asset) in self.order.iter().flatten().enumerate() {
            self.positions.insert(asset.id.clone(), position);
        }
    }
}

/// Outcome of a selection change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub now_empty: bool,
    pub mode_changed: bool,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    variant: PickerVariant,
    selection: SelectionSet,
    mode: LayoutMode,
}

impl SelectionController {
    pub fn new(variant: PickerVariant) -> Self {
        let selection = SelectionSet::default();
        let mode = Self::mode_for(variant, &selection);
        Self {
            variant,
            selection,
            mode,
        }
    }

    /// Layout mode as a pure function of the variant and selection emptiness
    pub fn mode_for(variant: PickerVariant, selection: &SelectionSet) -> LayoutMode {
        match variant {
            PickerVariant::AlwaysExpanded => LayoutMode::Expanded,
            PickerVariant::SelectionDriven if selection.is_empty() => LayoutMode::Compact,
            PickerVariant::SelectionDriven => LayoutMode::Expanded,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, id: &AssetId) -> bool {
        self.selection.contains(id)
    }

    /// Toggles `asset`, shown at grid position `index`
    pub fn toggle(&mut self, asset: &PhotoAsset, index: usize) -> SelectionChange {
        let was_empty = self.selection.is_empty();
        let now_empty = self.selection.toggle(asset);
        let mode_changed = self.sync_mode();

        log::debug!(
            "Toggled {} ({} selected, mode {:?})",
            asset.id,
            self.selection.len(),
            self.mode
        );

        let mut effects = Vec::with_capacity(3);
        if mode_changed {
            effects.push(Effect::Relayout);
            effects.push(Effect::RebindCamera);
        }
        if was_empty == now_empty {
            effects.push(Effect::RefreshSendTitle);
        }
        // Not animated across a mode switch
        effects.push(Effect::ScrollIntoView {
            index,
            animated: !mode_changed,
        });

        SelectionChange {
            now_empty,
            mode_changed,
            effects,
        }
    }

    /// Empties the selection, e.g. after a terminal send
    pub fn clear(&mut self) -> SelectionChange {
        self.selection.clear();
        let mode_changed = self.sync_mode();
        let effects = if mode_changed {
            vec![Effect::Relayout, Effect::RebindCamera]
        } else {
            Vec::new()
        };
        SelectionChange {
            now_empty: true,
            mode_changed,
            effects,
        }
    }

    fn sync_mode(&mut self) -> bool {
        let mode = Self::mode_for(self.variant, &self.selection);
        let changed = mode != self.mode;
        self.mode = mode;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relayouts(change: &SelectionChange) -> usize {
        change
            .effects
            .iter()
            .filter(|e| **e == Effect::Relayout)
            .count()
    }

    #[test]
    fn test_toggle_twice_restores_order() {
        let mut set = SelectionSet::default();
        let a = PhotoAsset::image("a", 1, 1);
        let b = PhotoAsset::image("b", 1, 1);
        let c = PhotoAsset::image("c", 1, 1);
        set.toggle(&a);
        set.toggle(&b);
        let before = set.assets();

        set.toggle(&c);
        set.toggle(&c);
        assert_eq!(set.assets(), before);
    }

    #[test]
    fn test_many_removals_keep_order_and_membership() {
        let mut set = SelectionSet::default();
        let assets: Vec<_> = (0..40)
            .map(|i| PhotoAsset::image(format!("p{}", i), 1, 1))
            .collect();
        for asset in &assets {
            set.toggle(asset);
        }
        // Drop every entry except multiples of 7; holes get compacted on the way
        for asset in assets.iter().enumerate().filter(|(i, _)| i % 7 != 0).map(|(_, a)| a) {
            set.toggle(asset);
        }
        let ids: Vec<_> = set.iter().map(|a| a.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["p0", "p7", "p14", "p21", "p28", "p35"]);
        assert_eq!(set.len(), 6);

        // Positions stay valid after compaction
        set.toggle(&assets[14]);
        set.toggle(&assets[1]);
        let ids: Vec<_> = set.iter().map(|a| a.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["p0", "p7", "p21", "p28", "p35", "p1"]);
        assert!(!set.contains(&AssetId::new("p14")));
    }

    #[test]
    fn test_remove_preserves_remaining_order() {
        let mut set = SelectionSet::default();
        for id in ["a", "b", "c"] {
            set.toggle(&PhotoAsset::image(id, 1, 1));
        }
        set.toggle(&PhotoAsset::image("b", 1, 1));
        let ids: Vec<_> = set.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(!set.contains(&AssetId::new("b")));
    }

    #[test]
    fn test_first_toggle_switches_to_expanded() {
        let mut controller = SelectionController::new(PickerVariant::SelectionDriven);
        assert_eq!(controller.mode(), LayoutMode::Compact);

        let change = controller.toggle(&PhotoAsset::image("a", 4, 3), 1);
        assert!(!change.now_empty);
        assert!(change.mode_changed);
        assert_eq!(relayouts(&change), 1);
        assert_eq!(controller.mode(), LayoutMode::Expanded);
        assert!(change.effects.contains(&Effect::ScrollIntoView {
            index: 1,
            animated: false
        }));
    }

    #[test]
    fn test_non_emptiness_toggle_does_not_relayout() {
        let mut controller = SelectionController::new(PickerVariant::SelectionDriven);
        controller.toggle(&PhotoAsset::image("a", 1, 1), 1);

        let change = controller.toggle(&PhotoAsset::image("b", 1, 1), 2);
        assert!(!change.mode_changed);
        assert_eq!(relayouts(&change), 0);
        assert_eq!(
            change.effects,
            vec![
                Effect::RefreshSendTitle,
                Effect::ScrollIntoView {
                    index: 2,
                    animated: true
                }
            ]
        );
    }

    #[test]
    fn test_last_deselect_returns_to_compact() {
        let mut controller = SelectionController::new(PickerVariant::SelectionDriven);
        let a = PhotoAsset::image("a", 1, 1);
        controller.toggle(&a, 1);
        let change = controller.toggle(&a, 1);
        assert!(change.now_empty);
        assert!(change.mode_changed);
        assert_eq!(relayouts(&change), 1);
        assert_eq!(controller.mode(), LayoutMode::Compact);
    }

    #[test]
    fn test_always_expanded_never_relayouts() {
        let mut controller = SelectionController::new(PickerVariant::AlwaysExpanded);
        assert_eq!(controller.mode(), LayoutMode::Expanded);
        let a = PhotoAsset::image("a", 1, 1);
        assert_eq!(relayouts(&controller.toggle(&a, 0)), 0);
        assert_eq!(relayouts(&controller.toggle(&a, 0)), 0);
    }

    #[test]
    fn test_clear() {
        let mut controller = SelectionController::new(PickerVariant::SelectionDriven);
        controller.toggle(&PhotoAsset::image("a", 1, 1), 1);
        let change = controller.clear();
        assert!(change.mode_changed);
        assert!(controller.selection().is_empty());

        assert!(controller.clear().effects.is_empty());
    }
}
