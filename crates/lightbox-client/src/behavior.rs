//! Open/close, focus return and focus trap for lightbox overlays.
//!
//! Every instance is a `Closed`/`Open` pair driven by its checkbox toggle.
//! Pointer clicks on labels flip the toggle natively; keyboard activation and
//! Escape flip it from here and then run the same change handler, so both
//! paths converge on the toggle's change signal.

use crate::page::{Event, Key, Outcome, Page, Role};
use crate::state::FocusState;

/// Behavior attached to one page.
#[derive(Debug)]
pub struct LightboxBehavior<P: Page> {
    state: FocusState<P::Element>,
}

impl<P: Page> LightboxBehavior<P> {
    /// Attach to `page`.
    ///
    /// Returns `None` when a behavior is already attached, so a second
    /// script inclusion never registers handlers twice.
    pub fn attach(page: &mut P) -> Option<Self> {
        if page.is_initialized() {
            tracing::trace!("Lightbox behavior already attached");
            return None;
        }
        page.mark_initialized();
        Some(Self {
            state: FocusState::default(),
        })
    }

    /// Page-wide focus state.
    #[must_use]
    pub fn state(&self) -> &FocusState<P::Element> {
        &self.state
    }

    /// Dispatch one page event.
    pub fn handle(&mut self, page: &mut P, event: Event<P::Element>) -> Outcome {
        match event {
            Event::Click(target) => {
                if page.role(&target) == Role::Trigger {
                    self.state.record_trigger(target);
                }
                Outcome::Ignored
            }
            Event::KeyDown { target, key, shift } => self.key_down(page, &target, key, shift),
            Event::Change(toggle) => {
                self.changed(page, &toggle);
                Outcome::Ignored
            }
            Event::AnimationFrame => {
                if let Some(element) = self.state.take_pending_focus() {
                    page.focus(&element);
                }
                Outcome::Ignored
            }
        }
    }

    fn key_down(&mut self, page: &mut P, target: &P::Element, key: Key, shift: bool) -> Outcome {
        match key {
            Key::Escape => {
                let open: Vec<_> = page
                    .toggles()
                    .into_iter()
                    .filter(|t| page.is_checked(t))
                    .collect();
                if open.is_empty() {
                    return Outcome::Ignored;
                }
                for toggle in &open {
                    self.set_open(page, toggle, false);
                }
                Outcome::Handled
            }
            Key::Tab => Self::trap_focus(page, target, shift),
            key if key.is_activation() => {
                let role = page.role(target);
                let Some(toggle) = page.toggle_for(target) else {
                    return Outcome::Ignored;
                };
                match role {
                    Role::Trigger => {
                        if !page.is_checked(&toggle) {
                            self.state.record_trigger(target.clone());
                            self.set_open(page, &toggle, true);
                        }
                        Outcome::Handled
                    }
                    Role::Close => {
                        self.set_open(page, &toggle, false);
                        Outcome::Handled
                    }
                    _ => Outcome::Ignored,
                }
            }
            _ => Outcome::Ignored,
        }
    }

    /// Flip a toggle from script and raise its change signal.
    fn set_open(&mut self, page: &mut P, toggle: &P::Element, open: bool) {
        page.set_checked(toggle, open);
        self.changed(page, toggle);
    }

    fn changed(&mut self, page: &mut P, toggle: &P::Element) {
        if page.role(toggle) != Role::Toggle {
            return;
        }

        if page.is_checked(toggle) {
            tracing::trace!(?toggle, "Lightbox opened");
            if let Some(close) = page.close_control_of(toggle) {
                self.state.defer_focus(close);
            }
            return;
        }

        tracing::trace!(?toggle, "Lightbox closed");
        let restore = self
            .state
            .take_trigger_if(|trigger| page.toggle_for(trigger).as_ref() == Some(toggle))
            .or_else(|| page.trigger_of(toggle));
        if let Some(trigger) = restore {
            page.focus(&trigger);
        }
    }

    fn trap_focus(page: &mut P, target: &P::Element, shift: bool) -> Outcome {
        let open: Vec<_> = page
            .toggles()
            .into_iter()
            .filter(|t| page.is_checked(t))
            .collect();

        let active = open
            .iter()
            .find(|t| page.focusable_in_overlay(t).contains(target))
            .or_else(|| open.last());
        let Some(toggle) = active else {
            return Outcome::Ignored;
        };

        let items = page.focusable_in_overlay(toggle);
        let (Some(first), Some(last)) = (items.first(), items.last()) else {
            return Outcome::Handled;
        };

        let next = match items.iter().position(|e| e == target) {
            None if shift => last,
            None => first,
            Some(0) if shift => last,
            Some(i) if !shift && i == items.len() - 1 => first,
            Some(_) => return Outcome::Ignored,
        };
        page.focus(next);
        Outcome::Handled
    }
}
