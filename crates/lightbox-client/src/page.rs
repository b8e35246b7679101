//! Abstract page the behavior runs against.

use std::fmt;

/// Part a page element plays in the lightbox markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// `label.lightbox-trigger-label`
    Trigger,
    /// `label.lightbox-close`
    Close,
    /// `label.lightbox-backdrop-close`
    Backdrop,
    /// `input.lightbox-toggle`
    Toggle,
    /// Anything else.
    Other,
}

/// Keys the behavior reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            _ => Self::Other,
        }
    }

    /// Enter and Space activate buttons.
    pub(crate) fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Input event delivered to the behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<E> {
    /// Pointer click on an element.
    Click(E),
    /// Key press with the focused element as target.
    KeyDown { target: E, key: Key, shift: bool },
    /// A toggle's checked state changed, by pointer or by script.
    Change(E),
    /// The next paint cycle started.
    AnimationFrame,
}

/// Whether the behavior consumed an event (`preventDefault`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Handled,
}

/// DOM operations the behavior needs.
///
/// Elements are opaque handles. The page owns all markup; the behavior only
/// reads roles and links, flips toggles, and moves focus.
pub trait Page {
    /// Element handle.
    type Element: Clone + PartialEq + fmt::Debug;

    /// Whether a behavior is already attached (the page-wide init marker).
    fn is_initialized(&self) -> bool;

    /// Set the page-wide init marker.
    fn mark_initialized(&mut self);

    /// Role of an element in the lightbox markup.
    fn role(&self, element: &Self::Element) -> Role;

    /// Toggle a trigger, close or backdrop label points at (its `for`).
    fn toggle_for(&self, label: &Self::Element) -> Option<Self::Element>;

    /// All toggles on the page in document order.
    fn toggles(&self) -> Vec<Self::Element>;

    /// Whether a toggle is checked (its overlay is open).
    fn is_checked(&self, toggle: &Self::Element) -> bool;

    /// Set a toggle's checked state without firing events.
    fn set_checked(&mut self, toggle: &Self::Element, checked: bool);

    /// Trigger label of a toggle's instance.
    fn trigger_of(&self, toggle: &Self::Element) -> Option<Self::Element>;

    /// Close control inside a toggle's overlay.
    fn close_control_of(&self, toggle: &Self::Element) -> Option<Self::Element>;

    /// Focusable elements inside a toggle's overlay, in tab order.
    fn focusable_in_overlay(&self, toggle: &Self::Element) -> Vec<Self::Element>;

    /// Move focus. Focusing a hidden element is a no-op.
    fn focus(&mut self, element: &Self::Element);
}
