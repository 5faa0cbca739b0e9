//! Cart Controller
//!
//! Owns the cart, its persisted snapshot and the checkout machine. Every
//! mutation goes through here so storage, the total and the badge are
//! refreshed together; the UI renders `CartView` and never reads state back
//! out of itself.

use tracing::{debug, info, warn};

use crate::cart::checkout::{ActionButton, CheckoutMachine, CheckoutState, PrimaryAction};
use crate::cart::item::{format_amount, CartItem};
use crate::cart::order::{Order, OrderBackend};
use crate::cart::storage::{clear_cart, load_cart, save_cart, KeyValueStorage};
use crate::cart::store::{AddOutcome, Cart};
use crate::error::{CartError, CartResult};

// == Notifications ==
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A dismissible message for the toast layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

// == View Projection ==
/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRowView {
    pub title: String,
    pub price: String,
    pub image: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Everything the cart panel needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub rows: Vec<CartRowView>,
    /// Formatted total, e.g. `"£39.98"`
    pub total: String,
    /// Item-count badge value
    pub badge: u64,
    pub show_empty_placeholder: bool,
    /// Whether the total/checkout summary is visible
    pub summary_visible: bool,
    pub fullscreen: bool,
    pub button: ActionButton,
    pub success_message: Option<String>,
}

// == Cart Controller ==
pub struct CartController<S> {
    cart: Cart,
    storage: S,
    machine: CheckoutMachine,
    notifications: Vec<Notification>,
}

impl<S: KeyValueStorage> CartController<S> {
    // == Constructor ==
    /// Restores the cart from `storage`, or starts empty.
    pub fn restore(storage: S) -> CartResult<Self> {
        let cart = Cart::from_items(load_cart(&storage)?);
        debug!("Restored cart with {} rows", cart.len());

        Ok(Self {
            machine: CheckoutMachine::new(!cart.is_empty()),
            cart,
            storage,
            notifications: Vec::new(),
        })
    }

    fn ensure_idle(&self) -> CartResult<()> {
        if self.machine.is_processing() {
            return Err(CartError::CheckoutInProgress);
        }
        Ok(())
    }

    /// Applies `op` to the cart, reconciles checkout state and writes the
    /// snapshot. If the write fails the cart and checkout state are rolled
    /// back.
    fn mutate<T>(&mut self, op: impl FnOnce(&mut Cart) -> CartResult<T>) -> CartResult<T> {
        self.ensure_idle()?;
        let cart = self.cart.clone();
        let machine = self.machine.clone();

        let value = op(&mut self.cart)?;
        let synced = self
            .machine
            .items_changed(!self.cart.is_empty())
            .and_then(|()| save_cart(&mut self.storage, self.cart.items()));

        if let Err(e) = synced {
            warn!("Cart change rolled back: {}", e);
            self.cart = cart;
            self.machine = machine;
            return Err(e);
        }
        Ok(value)
    }

    // == Cart Mutations ==
    /// Adds one copy of a catalog item.
    pub fn add_item(&mut self, item: CartItem) -> CartResult<AddOutcome> {
        let title = item.title.clone();
        let outcome = self.mutate(|cart| cart.add(item))?;
        debug!("Added '{}' to cart: {:?}", title, outcome);
        Ok(outcome)
    }

    pub fn increment(&mut self, title: &str) -> CartResult<u32> {
        self.mutate(|cart| cart.increment(title))
    }

    /// Returns `false` when the row was already at quantity 1.
    pub fn decrement(&mut self, title: &str) -> CartResult<bool> {
        self.mutate(|cart| cart.decrement(title))
    }

    pub fn remove(&mut self, title: &str) -> CartResult<CartItem> {
        let removed = self.mutate(|cart| cart.remove(title))?;
        debug!("Removed '{}' from cart", title);
        Ok(removed)
    }

    /// Empties the cart and drops the snapshot.
    pub fn reset(&mut self) -> CartResult<()> {
        self.ensure_idle()?;
        self.cart.clear();
        self.machine.close(false)?;
        clear_cart(&mut self.storage)
    }

    // == Checkout ==
    /// Opens the fullscreen review. An empty cart is refused without any
    /// remote call and surfaces an error notification.
    pub fn open_review(&mut self) -> CartResult<()> {
        if let Err(e) = self.machine.open_review(!self.cart.is_empty()) {
            self.notifications.push(Notification::error(e.to_string()));
            return Err(e);
        }
        Ok(())
    }

    /// Places the order.
    ///
    /// Performs at most one identity lookup and one order insert. Every
    /// failure leaves the confirm button enabled with its original label.
    pub async fn confirm<B: OrderBackend>(&mut self, backend: &B) -> CartResult<Order> {
        if self.cart.is_empty() {
            self.notifications
                .push(Notification::error(CartError::EmptyCart.to_string()));
            return Err(CartError::EmptyCart);
        }
        self.machine.begin_processing()?;

        let total = match self.cart.total() {
            Ok(total) => total,
            Err(e) => return Err(self.abort(e)),
        };

        let user_id = match backend.current_user().await {
            Ok(Some(user_id)) => user_id,
            Ok(None) => return Err(self.abort(CartError::NotAuthenticated)),
            Err(e) => return Err(self.abort(CartError::OrderFailed(e.to_string()))),
        };

        let order = Order::new(user_id, total);
        if let Err(e) = backend.insert_order(&order).await {
            return Err(self.abort(CartError::OrderFailed(e.to_string())));
        }

        self.cart.clear();
        if let Err(e) = clear_cart(&mut self.storage) {
            // The order exists remotely; a stale snapshot must not undo that
            warn!("Order placed but cart snapshot not cleared: {}", e);
        }
        self.machine.succeed(order.order_id)?;
        self.notifications
            .push(Notification::success("Order placed successfully!"));
        info!(
            "Order {} placed for user {} totalling {}",
            order.order_id, order.user_id, order.total_price
        );

        Ok(order)
    }

    /// Moves a failed confirmation to `Error` and queues the reason.
    fn abort(&mut self, error: CartError) -> CartError {
        let reason = error.to_string();
        warn!("Checkout failed: {}", reason);
        if let Err(e) = self.machine.fail(reason.clone()) {
            warn!("Checkout state not restored: {}", e);
        }
        self.notifications.push(Notification::error(reason));
        error
    }

    /// Runs whatever the primary button is bound to in the current state.
    ///
    /// Returns the order when the press confirmed a purchase.
    pub async fn press_primary<B: OrderBackend>(
        &mut self,
        backend: &B,
    ) -> CartResult<Option<Order>> {
        match self.machine.primary_action() {
            Some(PrimaryAction::OpenReview) => self.open_review().map(|()| None),
            Some(PrimaryAction::Confirm) => self.confirm(backend).await.map(Some),
            None if self.cart.is_empty() => {
                self.notifications
                    .push(Notification::error(CartError::EmptyCart.to_string()));
                Err(CartError::EmptyCart)
            }
            None => Ok(None),
        }
    }

    /// Dismisses the panel; refused while an order is in flight.
    pub fn close(&mut self) -> CartResult<()> {
        self.machine.close(!self.cart.is_empty())
    }

    /// Leaves the success screen for an empty cart.
    pub fn continue_shopping(&mut self) -> CartResult<()> {
        self.machine.continue_shopping()
    }

    // == Accessors ==
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn state(&self) -> &CheckoutState {
        self.machine.state()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Drains queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Projects the current state for rendering.
    pub fn view(&self) -> CartView {
        let symbol = self.cart.currency_symbol();
        let success_message = match self.machine.state() {
            CheckoutState::Success { order_id } => Some(format!(
                "Thank you for your purchase! Your order number is {order_id}."
            )),
            _ => None,
        };
        let has_rows = !self.cart.is_empty();

        CartView {
            rows: self
                .cart
                .items()
                .iter()
                .map(|item| CartRowView {
                    title: item.title.clone(),
                    price: item.price.clone(),
                    image: item.image.clone(),
                    quantity: item.quantity,
                    line_total: format_amount(symbol, item.line_total().unwrap_or_default()),
                })
                .collect(),
            total: format_amount(symbol, self.cart.total().unwrap_or_default()),
            badge: self.cart.item_count(),
            show_empty_placeholder: !has_rows && success_message.is_none(),
            summary_visible: has_rows,
            fullscreen: self.machine.is_fullscreen(),
            button: self.machine.button(),
            success_message,
        }
    }
}
