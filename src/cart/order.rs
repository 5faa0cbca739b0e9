//! Order Module
//!
//! The order record created at checkout and the backend seam that knows who
//! the user is and where orders go.

use std::future::Future;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;

// == Order ==
/// A placed order. Created once at confirmation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: Uuid,
    pub user_id: Uuid,
    pub order_date: NaiveDate,
    pub total_price: Decimal,
}

impl Order {
    /// Builds a new order for `user_id`, dated today (UTC).
    pub fn new(user_id: Uuid, total_price: Decimal) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            user_id,
            order_date: Utc::now().date_naive(),
            total_price,
        }
    }
}

// == Backend Seam ==
/// Remote identity and order persistence used by checkout.
pub trait OrderBackend {
    /// Id of the signed-in user, or None when there is no session.
    fn current_user(&self) -> impl Future<Output = Result<Option<Uuid>>> + Send;

    /// Inserts one order row.
    fn insert_order(&self, order: &Order) -> impl Future<Output = Result<()>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_is_dated_today() {
        let user = Uuid::new_v4();
        let order = Order::new(user, Decimal::new(3998, 2));

        assert_eq!(order.user_id, user);
        assert_eq!(order.order_date, Utc::now().date_naive());
        assert_ne!(order.order_id, Uuid::nil());
    }

    #[test]
    fn test_order_serializes_total_as_string() {
        let order = Order::new(Uuid::nil(), Decimal::new(3998, 2));
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["total_price"], "39.98");
        assert_eq!(json["user_id"], Uuid::nil().to_string());
        assert!(json["order_date"].is_string());
    }
}
