//! Leptos DragDrop Utilities
//!
//! Mouse-driven reordering for grids of cards.
//! Uses a movement threshold to distinguish click from drag.
//!
//! All handlers attach to the sortable container and its cards, never to the
//! document, so a grid that unmounts leaves no listeners behind.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Completed reorder gesture: move the card at `from` so it lands at `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropResult {
    pub from: usize,
    pub to: usize,
}

/// Sort state signals
#[derive(Clone, Copy)]
pub struct SortSignals {
    /// Index of the card being dragged
    pub dragging_read: ReadSignal<Option<usize>>,
    pub dragging_write: WriteSignal<Option<usize>>,
    /// Index of the card under the pointer while dragging
    pub hover_read: ReadSignal<Option<usize>>,
    pub hover_write: WriteSignal<Option<usize>>,
    /// Pending index (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<usize>>,
    pub pending_write: WriteSignal<Option<usize>>,
    /// Start position for movement detection
    pub start_read: ReadSignal<(i32, i32)>,
    pub start_write: WriteSignal<(i32, i32)>,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_sort_signals() -> SortSignals {
    let (dragging_read, dragging_write) = signal(None::<usize>);
    let (hover_read, hover_write) = signal(None::<usize>);
    let (pending_read, pending_write) = signal(None::<usize>);
    let (start_read, start_write) = signal((0i32, 0i32));
    SortSignals {
        dragging_read,
        dragging_write,
        hover_read,
        hover_write,
        pending_read,
        pending_write,
        start_read,
        start_write,
    }
}

/// True once the pointer has moved far enough from `start` to count as a drag.
pub fn exceeds_threshold(start: (i32, i32), now: (i32, i32)) -> bool {
    let dx = (now.0 - start.0).abs();
    let dy = (now.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// Turn the drag state at mouseup into a reorder, if there is one to apply.
pub fn resolve_drop(dragging: Option<usize>, hover: Option<usize>) -> Option<DropResult> {
    match (dragging, hover) {
        (Some(from), Some(to)) if from != to => Some(DropResult { from, to }),
        _ => None,
    }
}

/// Reset every piece of drag state
pub fn cancel_drag(sort: &SortSignals) {
    sort.dragging_write.set(None);
    sort.hover_write.set(None);
    sort.pending_write.set(None);
}

/// Create mousedown handler for a sortable card
/// Records pending drag with start position
pub fn make_on_mousedown(sort: SortSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        // Buttons and inputs inside the card keep their own click behaviour
        if let Some(target) = ev.target() {
            if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
            if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
        }
        sort.pending_write.set(Some(index));
        sort.start_write.set((ev.client_x(), ev.client_y()));
    }
}

/// Create mousemove handler for the container - starts drag if moved enough
pub fn make_on_mousemove(sort: SortSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        let pending = sort.pending_read.get_untracked();
        if pending.is_none() || sort.dragging_read.get_untracked().is_some() {
            return;
        }
        let start = sort.start_read.get_untracked();
        if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
            sort.dragging_write.set(pending);
        }
    }
}

/// Create mouseenter handler for cards (become drop target)
pub fn make_on_card_mouseenter(sort: SortSignals, index: usize) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = sort.dragging_read.get_untracked() {
            // Dropping on self is not a move
            if dragging != index {
                sort.hover_write.set(Some(index));
            }
        }
    }
}

/// Create mouseleave handler for cards
pub fn make_on_mouseleave(sort: SortSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if sort.dragging_read.get_untracked().is_some() {
            sort.hover_write.set(None);
        }
    }
}

/// Create mouseup handler for the container; fires `on_drop` for a completed gesture
pub fn make_on_mouseup<F>(sort: SortSignals, on_drop: F) -> impl Fn(web_sys::MouseEvent) + Clone + 'static
where
    F: Fn(DropResult) + Clone + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        let result = resolve_drop(
            sort.dragging_read.get_untracked(),
            sort.hover_read.get_untracked(),
        );
        cancel_drag(&sort);
        // A plain click falls through to the element's own click handler
        if let Some(result) = result {
            on_drop(result);
        }
    }
}

/// Create mouseleave handler for the container - abandons any drag in progress
pub fn make_on_container_leave(sort: SortSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        cancel_drag(&sort);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold() {
        assert!(!exceeds_threshold((10, 10), (10, 10)));
        assert!(!exceeds_threshold((10, 10), (15, 5)));
        assert!(exceeds_threshold((10, 10), (16, 10)));
        assert!(exceeds_threshold((10, 10), (10, 4)));
    }

    #[test]
    fn test_resolve_drop() {
        assert_eq!(resolve_drop(Some(0), Some(2)), Some(DropResult { from: 0, to: 2 }));
        assert_eq!(resolve_drop(Some(3), Some(1)), Some(DropResult { from: 3, to: 1 }));
        // Same slot, no target, or a click that never became a drag
        assert_eq!(resolve_drop(Some(1), Some(1)), None);
        assert_eq!(resolve_drop(Some(1), None), None);
        assert_eq!(resolve_drop(None, Some(1)), None);
    }
}
