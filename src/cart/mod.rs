//! Cart Module
//!
//! Shopping cart model, its localStorage-style persistence and the
//! two-stage checkout state machine.

pub mod checkout;
mod controller;
pub mod item;
mod order;
pub mod storage;
mod store;


// Re-export public types
pub use checkout::{ActionButton, ButtonLabel, CheckoutMachine, CheckoutState, PrimaryAction};
pub use controller::{CartController, CartRowView, CartView, Notification, NotificationKind};
pub use item::CartItem;
pub use order::{Order, OrderBackend};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, CART_STORAGE_KEY};
pub use store::{AddOutcome, Cart};
