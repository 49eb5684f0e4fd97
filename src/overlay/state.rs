use crate::overlay::keyboard::{normalize_key, KeyAction, KeyCode, KeyEvent};
use crate::overlay::layout::find_key;
use crate::overlay::model::{KeyDescriptor, KeyRect};
use std::collections::HashSet;

/// Labels of the keys currently held down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressedKeySet {
    labels: HashSet<String>,
}

impl PressedKeySet {
    pub fn insert(&mut self, label: String) {
        self.labels.insert(label);
    }

    pub fn remove(&mut self, label: &str) {
        self.labels.remove(label);
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitState {
    pub last_hit_rect: Option<KeyRect>,
    pub hit_timer_ms: i64,
}

impl HitState {
    /// Rect the hit pose should be drawn over, if the pose is still active.
    pub fn active_rect(&self) -> Option<KeyRect> {
        if self.hit_timer_ms > 0 {
            self.last_hit_rect
        } else {
            None
        }
    }
}

/// Offset between the pointer and the window origin while a drag is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    anchor: Option<(i32, i32)>,
}

impl DragState {
    pub fn begin(&mut self, pointer_global: (i32, i32), window_pos: (i32, i32)) {
        self.anchor = Some((
            pointer_global.0 - window_pos.0,
            pointer_global.1 - window_pos.1,
        ));
    }

    /// New window origin for the pointer position, or `None` when no drag is
    /// in progress.
    pub fn target(&self, pointer_global: (i32, i32)) -> Option<(i32, i32)> {
        let (dx, dy) = self.anchor?;
        Some((pointer_global.0 - dx, pointer_global.1 - dy))
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }

    pub fn anchor(&self) -> Option<(i32, i32)> {
        self.anchor
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Idle,
    /// Cat is drawn over the given key.
    Hit(KeyRect),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Other,
}

/// All mutable UI state of the overlay.
#[derive(Debug, Clone)]
pub struct OverlayState {
    keys: Vec<KeyDescriptor>,
    pressed: PressedKeySet,
    hit: HitState,
    drag: DragState,
    hit_duration_ms: i64,
}

impl OverlayState {
    pub fn new(keys: Vec<KeyDescriptor>, hit_duration_ms: i64) -> Self {
        Self {
            keys,
            pressed: PressedKeySet::default(),
            hit: HitState::default(),
            drag: DragState::default(),
            hit_duration_ms,
        }
    }

    pub fn keys(&self) -> &[KeyDescriptor] {
        &self.keys
    }

    pub fn pressed(&self) -> &PressedKeySet {
        &self.pressed
    }

    pub fn hit(&self) -> HitState {
        self.hit
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn is_pressed(&self, label: &str) -> bool {
        self.pressed.contains(label)
    }

    pub fn handle_key_event(&mut self, event: KeyEvent) {
        match event.action {
            KeyAction::Press => self.key_press(event.key),
            KeyAction::Release => self.key_release(event.key),
        }
    }

    /// Records a press. The hit timer is reset before the rect lookup; a label
    /// missing from the layout keeps the previous rect.
    pub fn key_press(&mut self, key: KeyCode) {
        let Some(label) = normalize_key(key) else {
            return;
        };

        self.hit.hit_timer_ms = self.hit_duration_ms;
        if let Some(found) = find_key(&self.keys, &label) {
            self.hit.last_hit_rect = Some(found.rect);
        }
        tracing::debug!(%label, "key pressed");
        self.pressed.insert(label);
    }

    pub fn key_release(&mut self, key: KeyCode) {
        if let Some(label) = normalize_key(key) {
            self.pressed.remove(&label);
        }
    }

    /// Advances the hit timer and reports the pose to draw this frame.
    ///
    /// The frame that sees a positive timer still draws the hit pose; the
    /// elapsed time is charged afterwards.
    pub fn tick(&mut self, elapsed_ms: i64) -> Pose {
        match self.hit.active_rect() {
            Some(rect) => {
                self.hit.hit_timer_ms -= elapsed_ms;
                Pose::Hit(rect)
            }
            None => Pose::Idle,
        }
    }

    pub fn pointer_down(
        &mut self,
        button: PointerButton,
        pointer_global: (i32, i32),
        window_pos: (i32, i32),
    ) {
        if button == PointerButton::Left {
            self.drag.begin(pointer_global, window_pos);
            tracing::debug!(anchor = ?self.drag.anchor(), "drag started");
        }
    }

    /// Returns the window position that keeps the drag anchor under the pointer.
    pub fn pointer_moved(&self, pointer_global: (i32, i32)) -> Option<(i32, i32)> {
        self.drag.target(pointer_global)
    }

    pub fn pointer_up(&mut self, button: PointerButton) {
        if button == PointerButton::Left && self.drag.is_dragging() {
            self.drag.end();
            tracing::debug!("drag ended");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutMetrics;
    use crate::overlay::layout::generate_keys;

    fn state() -> OverlayState {
        OverlayState::new(generate_keys(&LayoutMetrics::default()), 150)
    }

    #[test]
    fn press_sets_timer_and_rect() {
        let mut state = state();
        state.key_press(KeyCode::Char('a'));
        let a = find_key(state.keys(), "A").unwrap().rect;
        assert_eq!(state.hit().hit_timer_ms, 150);
        assert_eq!(state.hit().last_hit_rect, Some(a));
        assert!(state.is_pressed("A"));
    }

    #[test]
    fn unknown_label_keeps_previous_rect() {
        let mut state = state();
        state.key_press(KeyCode::Char('q'));
        let q = state.hit().last_hit_rect;
        state.tick(100);

        state.key_press(KeyCode::Char('!'));
        assert_eq!(state.hit().last_hit_rect, q);
        assert_eq!(state.hit().hit_timer_ms, 150);
        assert!(state.is_pressed("!"));
    }

    #[test]
    fn dropped_key_does_not_touch_state() {
        let mut state = state();
        state.key_press(KeyCode::Other);
        assert!(state.pressed().is_empty());
        assert_eq!(state.hit(), HitState::default());
    }

    #[test]
    fn release_of_unpressed_key_is_noop() {
        let mut state = state();
        state.key_release(KeyCode::Enter);
        assert!(state.pressed().is_empty());
    }

    #[test]
    fn hit_pose_drawn_until_timer_runs_out() {
        let mut state = state();
        state.key_press(KeyCode::Space);
        let space = find_key(state.keys(), "SPACE").unwrap().rect;

        assert_eq!(state.tick(100), Pose::Hit(space));
        assert_eq!(state.tick(50), Pose::Hit(space));
        assert_eq!(state.hit().hit_timer_ms, 0);
        assert_eq!(state.tick(16), Pose::Idle);
    }

    #[test]
    fn no_press_means_idle() {
        let mut state = state();
        assert_eq!(state.tick(16), Pose::Idle);
    }

    #[test]
    fn only_left_button_starts_drag() {
        let mut state = state();
        state.pointer_down(PointerButton::Other, (10, 10), (0, 0));
        assert_eq!(state.pointer_moved((20, 20)), None);

        state.pointer_down(PointerButton::Left, (10, 10), (0, 0));
        assert_eq!(state.pointer_moved((20, 25)), Some((10, 15)));

        state.pointer_up(PointerButton::Other);
        assert!(state.drag().is_dragging());
        state.pointer_up(PointerButton::Left);
        assert_eq!(state.pointer_moved((30, 30)), None);
    }
}
