//! Behavior scenarios against an in-memory page.

use lightbox_client::{Event, Key, LightboxBehavior, Outcome, Page, Role};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum El {
    Trigger(usize),
    Toggle(usize),
    Close(usize),
    Link(usize),
    Backdrop(usize),
    Outside,
}

impl El {
    fn instance(self) -> Option<usize> {
        match self {
            Self::Trigger(i) | Self::Toggle(i) | Self::Close(i) | Self::Link(i) | Self::Backdrop(i) => {
                Some(i)
            }
            Self::Outside => None,
        }
    }
}

/// Page with `n` lightbox instances. Each overlay holds the close control
/// and one link.
#[derive(Debug)]
struct FakePage {
    initialized: bool,
    checked: Vec<bool>,
    focused: Option<El>,
}

impl FakePage {
    fn new(n: usize) -> Self {
        Self {
            initialized: false,
            checked: vec![false; n],
            focused: None,
        }
    }

    fn is_open(&self, i: usize) -> bool {
        self.checked[i]
    }

    /// Pointer click: the label flips its checkbox natively, which fires change.
    fn click(&mut self, behavior: &mut LightboxBehavior<Self>, el: El) {
        behavior.handle(self, Event::Click(el));
        if let Some(toggle) = self.toggle_for(&el) {
            let i = toggle.instance().unwrap();
            self.checked[i] = !self.checked[i];
            behavior.handle(self, Event::Change(toggle));
        }
    }

    fn key(&mut self, behavior: &mut LightboxBehavior<Self>, key: Key, shift: bool) -> Outcome {
        let target = self.focused.unwrap_or(El::Outside);
        behavior.handle(self, Event::KeyDown { target, key, shift })
    }

    fn paint(&mut self, behavior: &mut LightboxBehavior<Self>) {
        behavior.handle(self, Event::AnimationFrame);
    }
}

impl Page for FakePage {
    type Element = El;

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    fn role(&self, element: &El) -> Role {
        match element {
            El::Trigger(_) => Role::Trigger,
            El::Toggle(_) => Role::Toggle,
            El::Close(_) => Role::Close,
            El::Backdrop(_) => Role::Backdrop,
            El::Link(_) | El::Outside => Role::Other,
        }
    }

    fn toggle_for(&self, label: &El) -> Option<El> {
        match label {
            El::Trigger(i) | El::Close(i) | El::Backdrop(i) => Some(El::Toggle(*i)),
            _ => None,
        }
    }

    fn toggles(&self) -> Vec<El> {
        (0..self.checked.len()).map(El::Toggle).collect()
    }

    fn is_checked(&self, toggle: &El) -> bool {
        toggle.instance().is_some_and(|i| self.checked[i])
    }

    fn set_checked(&mut self, toggle: &El, checked: bool) {
        if let Some(i) = toggle.instance() {
            self.checked[i] = checked;
        }
    }

    fn trigger_of(&self, toggle: &El) -> Option<El> {
        toggle.instance().map(El::Trigger)
    }

    fn close_control_of(&self, toggle: &El) -> Option<El> {
        toggle.instance().map(El::Close)
    }

    fn focusable_in_overlay(&self, toggle: &El) -> Vec<El> {
        match toggle.instance() {
            Some(i) if self.checked[i] => vec![El::Close(i), El::Link(i)],
            _ => Vec::new(),
        }
    }

    fn focus(&mut self, element: &El) {
        let hidden = match element {
            El::Close(i) | El::Link(i) | El::Backdrop(i) => !self.checked[*i],
            _ => false,
        };
        if !hidden {
            self.focused = Some(*element);
        }
    }
}

fn attached(n: usize) -> (FakePage, LightboxBehavior<FakePage>) {
    let mut page = FakePage::new(n);
    let behavior = LightboxBehavior::attach(&mut page).unwrap();
    (page, behavior)
}

#[test]
fn test_attach_is_idempotent() {
    let mut page = FakePage::new(1);
    assert!(LightboxBehavior::attach(&mut page).is_some());
    assert!(LightboxBehavior::attach(&mut page).is_none());
    assert!(page.is_initialized());
}

#[test]
fn test_keyboard_open_focuses_close_after_paint() {
    let (mut page, mut behavior) = attached(1);
    page.focus(&El::Trigger(0));

    assert_eq!(page.key(&mut behavior, Key::Enter, false), Outcome::Handled);
    assert!(page.is_open(0));
    // Deferred to the next paint.
    assert_eq!(page.focused, Some(El::Trigger(0)));
    assert_eq!(behavior.state().pending_focus(), Some(&El::Close(0)));

    page.paint(&mut behavior);
    assert_eq!(page.focused, Some(El::Close(0)));
    assert_eq!(behavior.state().last_trigger(), Some(&El::Trigger(0)));
}

#[test]
fn test_space_activates_trigger_and_close() {
    let (mut page, mut behavior) = attached(1);
    page.focus(&El::Trigger(0));
    page.key(&mut behavior, Key::from_dom(" "), false);
    page.paint(&mut behavior);
    assert!(page.is_open(0));

    assert_eq!(page.key(&mut behavior, Key::Space, false), Outcome::Handled);
    assert!(!page.is_open(0));
    assert_eq!(page.focused, Some(El::Trigger(0)));
}

#[test]
fn test_pointer_open_and_backdrop_close_return_focus() {
    let (mut page, mut behavior) = attached(1);
    page.click(&mut behavior, El::Trigger(0));
    page.paint(&mut behavior);
    assert!(page.is_open(0));
    assert_eq!(page.focused, Some(El::Close(0)));

    page.click(&mut behavior, El::Backdrop(0));
    assert!(!page.is_open(0));
    assert_eq!(page.focused, Some(El::Trigger(0)));
    assert_eq!(behavior.state().last_trigger(), None);
}

#[test]
fn test_stale_deferred_focus_is_a_no_op() {
    let (mut page, mut behavior) = attached(1);
    page.focus(&El::Trigger(0));
    page.key(&mut behavior, Key::Enter, false);
    page.key(&mut behavior, Key::Escape, false);
    assert!(!page.is_open(0));
    assert_eq!(page.focused, Some(El::Trigger(0)));

    page.paint(&mut behavior);
    assert_eq!(page.focused, Some(El::Trigger(0)));
}

#[test]
fn test_tab_wraps_inside_open_overlay() {
    let (mut page, mut behavior) = attached(2);
    page.click(&mut behavior, El::Trigger(1));
    page.paint(&mut behavior);
    assert_eq!(page.focused, Some(El::Close(1)));

    // Close -> Link is native tab order.
    assert_eq!(page.key(&mut behavior, Key::Tab, false), Outcome::Ignored);
    page.focus(&El::Link(1));

    assert_eq!(page.key(&mut behavior, Key::Tab, false), Outcome::Handled);
    assert_eq!(page.focused, Some(El::Close(1)));

    assert_eq!(page.key(&mut behavior, Key::Tab, true), Outcome::Handled);
    assert_eq!(page.focused, Some(El::Link(1)));

    page.focus(&El::Outside);
    assert_eq!(page.key(&mut behavior, Key::Tab, false), Outcome::Handled);
    assert_eq!(page.focused, Some(El::Close(1)));
}

#[test]
fn test_tab_is_ignored_when_nothing_is_open() {
    let (mut page, mut behavior) = attached(1);
    page.focus(&El::Trigger(0));
    assert_eq!(page.key(&mut behavior, Key::Tab, false), Outcome::Ignored);
}

#[test]
fn test_opening_one_instance_keeps_others_open() {
    let (mut page, mut behavior) = attached(2);
    page.click(&mut behavior, El::Trigger(1));
    page.paint(&mut behavior);
    page.click(&mut behavior, El::Trigger(0));
    page.paint(&mut behavior);

    assert!(page.is_open(0));
    assert!(page.is_open(1));
    assert_eq!(behavior.state().last_trigger(), Some(&El::Trigger(0)));
}

#[test]
fn test_escape_closes_every_open_instance() {
    let (mut page, mut behavior) = attached(3);
    page.click(&mut behavior, El::Trigger(0));
    page.click(&mut behavior, El::Trigger(2));
    page.paint(&mut behavior);

    assert_eq!(page.key(&mut behavior, Key::Escape, false), Outcome::Handled);
    assert_eq!(page.checked, vec![false, false, false]);
    assert_eq!(page.focused, Some(El::Trigger(2)));

    assert_eq!(page.key(&mut behavior, Key::Escape, false), Outcome::Ignored);
}

#[test]
fn test_close_without_recorded_trigger_focuses_own_trigger() {
    let (mut page, mut behavior) = attached(2);
    page.click(&mut behavior, El::Trigger(0));
    page.click(&mut behavior, El::Trigger(1));

    page.click(&mut behavior, El::Close(0));
    assert_eq!(page.focused, Some(El::Trigger(0)));
    assert_eq!(behavior.state().last_trigger(), Some(&El::Trigger(1)));
}
