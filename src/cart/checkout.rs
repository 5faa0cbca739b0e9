//! Checkout State Machine
//!
//! Drives the two-stage checkout: side panel, then fullscreen review, then
//! order placement. The action button is part of the machine's state, so
//! the handler it triggers is decided by the current state rather than by
//! watching the button's label.

use std::fmt;

use uuid::Uuid;

use crate::error::{CartError, CartResult};

// == Checkout State ==
/// Where the cart is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutState {
    /// No rows; empty-state placeholder shown
    Empty,
    /// One or more rows in the side panel
    Populated,
    /// Fullscreen panel awaiting confirmation
    FullscreenReview,
    /// Order insert in flight
    Processing,
    /// Order placed; success message shown
    Success { order_id: Uuid },
    /// Last confirmation failed; fullscreen panel still open for a retry
    Error { reason: String },
}

impl CheckoutState {
    /// Short lowercase name used in error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Empty => "empty",
            CheckoutState::Populated => "populated",
            CheckoutState::FullscreenReview => "reviewing",
            CheckoutState::Processing => "processing",
            CheckoutState::Success { .. } => "complete",
            CheckoutState::Error { .. } => "failed",
        }
    }
}

// == Action Button ==
/// Label shown on the cart's primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabel {
    Checkout,
    ConfirmPurchase,
    Processing,
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ButtonLabel::Checkout => "Checkout",
            ButtonLabel::ConfirmPurchase => "Confirm Purchase",
            ButtonLabel::Processing => "Processing...",
        };
        f.write_str(text)
    }
}

/// The cart's primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton {
    pub label: ButtonLabel,
    pub enabled: bool,
}

impl ActionButton {
    fn checkout() -> Self {
        Self {
            label: ButtonLabel::Checkout,
            enabled: true,
        }
    }

    fn confirm() -> Self {
        Self {
            label: ButtonLabel::ConfirmPurchase,
            enabled: true,
        }
    }

    fn busy() -> Self {
        Self {
            label: ButtonLabel::Processing,
            enabled: false,
        }
    }
}

/// What pressing the primary button does in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    OpenReview,
    Confirm,
}

// == Checkout Machine ==
#[derive(Debug, Clone)]
pub struct CheckoutMachine {
    state: CheckoutState,
    button: ActionButton,
}

impl CheckoutMachine {
    /// Starts in `Empty` or `Populated` depending on the restored cart.
    pub fn new(has_items: bool) -> Self {
        Self {
            state: Self::panel_state(has_items),
            button: ActionButton::checkout(),
        }
    }

    fn panel_state(has_items: bool) -> CheckoutState {
        if has_items {
            CheckoutState::Populated
        } else {
            CheckoutState::Empty
        }
    }

    fn invalid(&self, action: &'static str) -> CartError {
        CartError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn button(&self) -> ActionButton {
        self.button
    }

    /// True while the enlarged panel is showing.
    pub fn is_fullscreen(&self) -> bool {
        matches!(
            self.state,
            CheckoutState::FullscreenReview
                | CheckoutState::Processing
                | CheckoutState::Success { .. }
                | CheckoutState::Error { .. }
        )
    }

    pub fn is_processing(&self) -> bool {
        self.state == CheckoutState::Processing
    }

    /// Handler bound to the primary button, if it is clickable.
    pub fn primary_action(&self) -> Option<PrimaryAction> {
        if !self.button.enabled {
            return None;
        }
        match self.state {
            CheckoutState::Populated => Some(PrimaryAction::OpenReview),
            CheckoutState::FullscreenReview | CheckoutState::Error { .. } => {
                Some(PrimaryAction::Confirm)
            }
            _ => None,
        }
    }

    // == Cart Mutations ==
    /// Reconciles the state after rows were added, changed or removed.
    pub fn items_changed(&mut self, has_items: bool) -> CartResult<()> {
        match self.state {
            CheckoutState::Processing => Err(CartError::CheckoutInProgress),
            CheckoutState::FullscreenReview | CheckoutState::Error { .. } if has_items => {
                // Fullscreen stays open; a stale error is dropped
                self.state = CheckoutState::FullscreenReview;
                self.button = ActionButton::confirm();
                Ok(())
            }
            _ => {
                self.state = Self::panel_state(has_items);
                self.button = ActionButton::checkout();
                Ok(())
            }
        }
    }

    // == Transitions ==
    /// `Populated -> FullscreenReview`: enlarge the panel and arm confirmation.
    pub fn open_review(&mut self, has_items: bool) -> CartResult<()> {
        match self.state {
            CheckoutState::Processing => return Err(CartError::CheckoutInProgress),
            CheckoutState::Success { .. } => return Err(self.invalid("open checkout")),
            _ => {}
        }
        if !has_items {
            return Err(CartError::EmptyCart);
        }
        self.state = CheckoutState::FullscreenReview;
        self.button = ActionButton::confirm();
        Ok(())
    }

    /// `FullscreenReview | Error -> Processing`: lock the button.
    pub fn begin_processing(&mut self) -> CartResult<()> {
        match self.state {
            CheckoutState::FullscreenReview | CheckoutState::Error { .. } => {
                self.state = CheckoutState::Processing;
                self.button = ActionButton::busy();
                Ok(())
            }
            CheckoutState::Processing => Err(CartError::CheckoutInProgress),
            _ => Err(self.invalid("confirm")),
        }
    }

    /// `Processing -> Success`.
    pub fn succeed(&mut self, order_id: Uuid) -> CartResult<()> {
        if !self.is_processing() {
            return Err(self.invalid("complete an order"));
        }
        self.state = CheckoutState::Success { order_id };
        self.button = ActionButton::checkout();
        Ok(())
    }

    /// `Processing -> Error`: the button becomes clickable again with its
    /// confirmation label.
    pub fn fail(&mut self, reason: impl Into<String>) -> CartResult<()> {
        if !self.is_processing() {
            return Err(self.invalid("fail an order"));
        }
        self.state = CheckoutState::Error {
            reason: reason.into(),
        };
        self.button = ActionButton::confirm();
        Ok(())
    }

    /// Dismisses the cart panel. Not allowed while an order is in flight.
    pub fn close(&mut self, has_items: bool) -> CartResult<()> {
        if self.is_processing() {
            return Err(CartError::CheckoutInProgress);
        }
        self.state = Self::panel_state(has_items);
        self.button = ActionButton::checkout();
        Ok(())
    }

    /// `Success -> Empty`.
    pub fn continue_shopping(&mut self) -> CartResult<()> {
        if !matches!(self.state, CheckoutState::Success { .. }) {
            return Err(self.invalid("continue shopping"));
        }
        self.state = CheckoutState::Empty;
        self.button = ActionButton::checkout();
        Ok(())
    }
}
