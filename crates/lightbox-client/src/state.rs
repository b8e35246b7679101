//! Page-wide focus bookkeeping.

/// Focus state shared by all lightbox instances of a page.
///
/// Holds one "last activating trigger" slot, overwritten on every open and
/// consumed on close, plus the close control waiting for the next paint
/// before it can take focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusState<E> {
    last_trigger: Option<E>,
    pending_focus: Option<E>,
}

impl<E> Default for FocusState<E> {
    fn default() -> Self {
        Self {
            last_trigger: None,
            pending_focus: None,
        }
    }
}

impl<E: PartialEq> FocusState<E> {
    /// Remember the trigger that opened an overlay.
    pub fn record_trigger(&mut self, trigger: E) {
        self.last_trigger = Some(trigger);
    }

    /// Trigger that most recently opened an overlay.
    #[must_use]
    pub fn last_trigger(&self) -> Option<&E> {
        self.last_trigger.as_ref()
    }

    /// Take the remembered trigger if `belongs` says it is the one to restore.
    pub fn take_trigger_if(&mut self, belongs: impl FnOnce(&E) -> bool) -> Option<E> {
        if self.last_trigger.as_ref().is_some_and(belongs) {
            self.last_trigger.take()
        } else {
            None
        }
    }

    /// Focus `element` on the next paint.
    pub fn defer_focus(&mut self, element: E) {
        self.pending_focus = Some(element);
    }

    /// Element waiting for the next paint.
    #[must_use]
    pub fn pending_focus(&self) -> Option<&E> {
        self.pending_focus.as_ref()
    }

    pub(crate) fn take_pending_focus(&mut self) -> Option<E> {
        self.pending_focus.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_is_overwritten() {
        let mut state = FocusState::default();
        state.record_trigger("a");
        state.record_trigger("b");
        assert_eq!(state.last_trigger(), Some(&"b"));
    }

    #[test]
    fn test_take_trigger_if() {
        let mut state = FocusState::default();
        state.record_trigger("a");

        assert_eq!(state.take_trigger_if(|t| *t == "b"), None);
        assert_eq!(state.last_trigger(), Some(&"a"));

        assert_eq!(state.take_trigger_if(|t| *t == "a"), Some("a"));
        assert_eq!(state.last_trigger(), None);
    }

    #[test]
    fn test_pending_focus_is_consumed_once() {
        let mut state = FocusState::default();
        state.defer_focus(1);
        assert_eq!(state.take_pending_focus(), Some(1));
        assert_eq!(state.take_pending_focus(), None);
    }
}
