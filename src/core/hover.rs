//! # Hover Intent
//!
//! Debounces pointer hover so sweeping across sibling items does not
//! activate each one. Every hover-capable group owns one slot: scheduling
//! into a slot replaces whatever was pending there, so activations for a
//! group can never race or land out of order.
//!
//! Time is passed in rather than read from the clock. The event loop feeds
//! `Instant::now()`; tests feed a fixed base plus offsets.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default delay before a hovered column item or tab activates.
pub const HOVER_INTENT: Duration = Duration::from_millis(120);
/// Default delay before leaving the overlay closes it. Longer than
/// `HOVER_INTENT` so brief excursions over gaps are tolerated.
pub const LEAVE_INTENT: Duration = Duration::from_millis(175);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverGroup {
    Column1,
    Column2,
    Tabs,
    OverlayLeave,
}

/// What fires when a slot's delay elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    Category(String),
    Crypto(String),
    Tab { panel: String, tab: String },
    CloseOverlay,
}

impl HoverTarget {
    /// The slot this target schedules into.
    pub fn group(&self) -> HoverGroup {
        match self {
            HoverTarget::Category(_) => HoverGroup::Column1,
            HoverTarget::Crypto(_) => HoverGroup::Column2,
            HoverTarget::Tab { .. } => HoverGroup::Tabs,
            HoverTarget::CloseOverlay => HoverGroup::OverlayLeave,
        }
    }
}

#[derive(Debug, Clone)]
struct Pending {
    target: HoverTarget,
    due: Instant,
}

#[derive(Debug, Default)]
pub struct HoverIntent {
    slots: HashMap<HoverGroup, Pending>,
}

impl HoverIntent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `target` to fire `delay` after `now`, cancelling the group's
    /// previous entry.
    pub fn schedule(&mut self, group: HoverGroup, target: HoverTarget, delay: Duration, now: Instant) {
        self.slots.insert(
            group,
            Pending {
                target,
                due: now + delay,
            },
        );
    }

    pub fn cancel(&mut self, group: HoverGroup) {
        self.slots.remove(&group);
    }

    pub fn cancel_all(&mut self) {
        self.slots.clear();
    }

    /// Earliest deadline across all groups.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots.values().map(|p| p.due).min()
    }

    /// Remove and return every entry due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(HoverGroup, HoverTarget)> {
        let mut due: Vec<(HoverGroup, Pending)> = Vec::new();
        self.slots.retain(|group, pending| {
            if pending.due <= now {
                due.push((*group, pending.clone()));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(_, pending)| pending.due);
        due.into_iter().map(|(g, p)| (g, p.target)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_after_delay() {
        let t0 = Instant::now();
        let mut hover = HoverIntent::new();
        hover.schedule(HoverGroup::Column1, HoverTarget::Category("hardware".into()), HOVER_INTENT, t0);

        assert!(hover.take_due(t0 + ms(119)).is_empty());
        let fired = hover.take_due(t0 + ms(120));
        assert_eq!(
            fired,
            vec![(HoverGroup::Column1, HoverTarget::Category("hardware".into()))]
        );
        assert!(!hover.slots.contains_key(&HoverGroup::Column1));
    }

    #[test]
    fn test_second_schedule_cancels_first() {
        let t0 = Instant::now();
        let mut hover = HoverIntent::new();
        hover.schedule(HoverGroup::Column1, HoverTarget::Category("software".into()), HOVER_INTENT, t0);
        hover.schedule(
            HoverGroup::Column1,
            HoverTarget::Category("hardware".into()),
            HOVER_INTENT,
            t0 + ms(60),
        );

        // The first deadline passes without anything firing.
        assert!(hover.take_due(t0 + ms(130)).is_empty());
        let fired = hover.take_due(t0 + ms(180));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].1, HoverTarget::Category("hardware".into()));
    }

    #[test]
    fn test_groups_are_independent() {
        let t0 = Instant::now();
        let mut hover = HoverIntent::new();
        hover.schedule(HoverGroup::Column1, HoverTarget::Category("hardware".into()), HOVER_INTENT, t0);
        hover.schedule(HoverGroup::Column2, HoverTarget::Crypto("aes".into()), HOVER_INTENT, t0 + ms(10));
        hover.cancel(HoverGroup::Column1);

        assert!(!hover.slots.contains_key(&HoverGroup::Column1));
        assert!(hover.slots.contains_key(&HoverGroup::Column2));
        assert_eq!(hover.next_deadline(), Some(t0 + ms(130)));
    }

    #[test]
    fn test_take_due_orders_by_deadline() {
        let t0 = Instant::now();
        let mut hover = HoverIntent::new();
        hover.schedule(HoverGroup::OverlayLeave, HoverTarget::CloseOverlay, LEAVE_INTENT, t0);
        hover.schedule(HoverGroup::Tabs, HoverTarget::Tab { panel: "insights".into(), tab: "white".into() }, HOVER_INTENT, t0);

        let fired = hover.take_due(t0 + ms(500));
        let groups: Vec<HoverGroup> = fired.iter().map(|(g, _)| *g).collect();
        assert_eq!(groups, vec![HoverGroup::Tabs, HoverGroup::OverlayLeave]);
    }

    #[test]
    fn test_cancel_all() {
        let t0 = Instant::now();
        let mut hover = HoverIntent::new();
        hover.schedule(HoverGroup::Column1, HoverTarget::Category("a".into()), HOVER_INTENT, t0);
        hover.schedule(HoverGroup::OverlayLeave, HoverTarget::CloseOverlay, LEAVE_INTENT, t0);
        hover.cancel_all();
        assert_eq!(hover.next_deadline(), None);
        assert!(hover.take_due(t0 + ms(1000)).is_empty());
    }
}
