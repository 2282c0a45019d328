//! Checkout flow against the hosted payment provider.
//!
//! Checkout pre-creates a pending order snapshotting the cart, opens a
//! hosted session carrying `{user_id, order_id}` metadata, and records the
//! session id on the order. Payment confirmation arrives later through the
//! payment webhook or the post-redirect session read.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use rigmart_core::config::payments::PaymentsConfig;
use rigmart_core::error::AppError;
use rigmart_core::result::AppResult;
use rigmart_database::repositories::cart::CartRepository;
use rigmart_database::repositories::order::{NewOrderItem, OrderRepository};
use rigmart_entity::cart::CartItemDetail;
use rigmart_entity::order::{Order, OrderStatus};
use rigmart_payments::gateway::CheckoutGateway;
use rigmart_payments::money::to_minor_units;
use rigmart_payments::session::{CheckoutLineItem, CreateSessionRequest};
use rigmart_payments::webhook::{PaymentEvent, PaymentEventKind};

use crate::context::RequestContext;

/// Result of opening a checkout session.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutStart {
    /// Provider session id, for the post-redirect status read.
    pub session_id: String,
    /// Hosted payment page URL to redirect the buyer to.
    pub url: String,
    /// The pending order created for this checkout.
    pub order_id: Uuid,
}

/// Drives checkout sessions and payment confirmation.
#[derive(Clone)]
pub struct CheckoutService {
    cart_repo: Arc<CartRepository>,
    order_repo: Arc<OrderRepository>,
    gateway: Arc<dyn CheckoutGateway>,
    config: PaymentsConfig,
}

impl CheckoutService {
    /// Creates a new checkout service.
    pub fn new(
        cart_repo: Arc<CartRepository>,
        order_repo: Arc<OrderRepository>,
        gateway: Arc<dyn CheckoutGateway>,
        config: PaymentsConfig,
    ) -> Self {
        Self {
            cart_repo,
            order_repo,
            gateway,
            config,
        }
    }

    /// Open a hosted checkout session for the caller's cart.
    ///
    /// Rejects an empty cart with a validation error. The cart is left
    /// untouched until payment is confirmed.
    pub async fn start(
        &self,
        ctx: &RequestContext,
        shipping_address: Option<serde_json::Value>,
    ) -> AppResult<CheckoutStart> {
        let cart = self.cart_repo.find_or_create(ctx.user_id).await?;
        let items = self.cart_repo.items(cart.id).await?;
        if items.is_empty() {
            return Err(AppError::validation("Cannot check out an empty cart"));
        }

        let snapshot: Vec<NewOrderItem> = items
            .iter()
            .map(|i| NewOrderItem {
                product_id: i.product_id,
                quantity: i.quantity,
                unit_price: i.unit_price,
            })
            .collect();
        let (order, _) = self
            .order_repo
            .create_with_items(ctx.user_id, &snapshot, shipping_address.as_ref())
            .await?;

        let line_items = build_line_items(&items)?;

        let mut metadata = HashMap::new();
        metadata.insert("user_id".to_string(), ctx.user_id.to_string());
        metadata.insert("order_id".to_string(), order.id.to_string());

        let request = CreateSessionRequest {
            currency: self.config.currency.clone(),
            line_items,
            success_url: self.config.success_url.clone(),
            cancel_url: self.config.cancel_url.clone(),
            metadata,
        };

        // One logical checkout per pending order; retries reuse the session.
        let idempotency_key = format!("order-{}", order.id);
        let session = self.gateway.create_session(&request, &idempotency_key).await?;

        self.order_repo
            .set_payment_session(order.id, &session.id)
            .await?;

        let url = session.url.ok_or_else(|| {
            AppError::upstream("Payment provider returned a session without a URL")
        })?;

        info!(order_id = %order.id, session_id = %session.id, "Checkout session opened");
        Ok(CheckoutStart {
            session_id: session.id,
            url,
            order_id: order.id,
        })
    }

    /// Post-redirect status read: resolve the caller's order for a session
    /// id and, if the provider reports it paid, settle it.
    pub async fn confirm(&self, ctx: &RequestContext, session_id: &str) -> AppResult<Order> {
        let session = self.gateway.fetch_session(session_id).await?;

        let order_id = session
            .metadata_value("order_id")
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or_else(|| AppError::not_found("Session carries no order reference"))?;

        let order = self
            .order_repo
            .find_by_id_for_user(order_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        if order.status != OrderStatus::Pending {
            return Ok(order);
        }

        if session.payment_status.as_deref() == Some("paid") {
            self.settle_paid_session(session_id).await?;
            let settled = self
                .order_repo
                .find_by_id_for_user(order_id, ctx.user_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;
            return Ok(settled);
        }

        Ok(order)
    }

    /// Apply a verified payment webhook event.
    pub async fn handle_event(&self, event: PaymentEvent) -> AppResult<()> {
        match event.kind {
            PaymentEventKind::CheckoutSessionCompleted => {
                self.settle_paid_session(&event.data.object.id).await
            }
            PaymentEventKind::CheckoutSessionExpired => {
                info!(session_id = %event.data.object.id, "Checkout session expired");
                Ok(())
            }
        }
    }

    /// Mark the order behind a paid session as paid and clear the buyer's
    /// cart. Idempotent: a second delivery finds no pending order and does
    /// nothing.
    async fn settle_paid_session(&self, session_id: &str) -> AppResult<()> {
        let Some(order) = self.order_repo.mark_paid_by_session(session_id).await? else {
            info!(session_id, "No pending order for session, already settled");
            return Ok(());
        };

        info!(order_id = %order.id, session_id, "Order paid");

        if let Some(user_id) = order.user_id {
            match self.cart_repo.find_by_user(user_id).await? {
                Some(cart) => {
                    self.cart_repo.clear(cart.id).await?;
                }
                None => {
                    warn!(order_id = %order.id, "Paid order's buyer has no cart to clear");
                }
            }
        }

        Ok(())
    }
}

/// Map cart rows to provider line items, converting prices to minor units.
fn build_line_items(items: &[CartItemDetail]) -> AppResult<Vec<CheckoutLineItem>> {
    items
        .iter()
        .map(|i| {
            Ok(CheckoutLineItem {
                name: i.product_name.clone(),
                unit_amount: to_minor_units(i.unit_price)?,
                quantity: i64::from(i.quantity),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rigmart_entity::user::UserRole;
    use rigmart_payments::session::CheckoutSession;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    struct StubGateway {
        session: CheckoutSession,
    }

    #[async_trait]
    impl CheckoutGateway for StubGateway {
        async fn create_session(
            &self,
            _request: &CreateSessionRequest,
            _idempotency_key: &str,
        ) -> AppResult<CheckoutSession> {
            Ok(self.session.clone())
        }

        async fn fetch_session(&self, _session_id: &str) -> AppResult<CheckoutSession> {
            Ok(self.session.clone())
        }
    }

    fn service(session: CheckoutSession) -> CheckoutService {
        let pool = sqlx::PgPool::connect_lazy("postgres://localhost/rigmart_test").unwrap();
        CheckoutService::new(
            Arc::new(CartRepository::new(pool.clone())),
            Arc::new(OrderRepository::new(pool)),
            Arc::new(StubGateway { session }),
            PaymentsConfig {
                api_base: "https://payments.test".to_string(),
                secret_key: "sk_test".to_string(),
                webhook_secret: "whsec_test".to_string(),
                success_url: "https://shop.test/success".to_string(),
                cancel_url: "https://shop.test/cancel".to_string(),
                currency: "eur".to_string(),
                webhook_tolerance_seconds: 300,
            },
        )
    }

    fn detail(name: &str, unit_price: Decimal, quantity: i32) -> CartItemDetail {
        CartItemDetail {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            product_name: name.to_string(),
            image_url: None,
            unit_price,
            quantity,
        }
    }

    #[test]
    fn test_idempotency_key_is_stable_per_order() {
        let order_id = Uuid::new_v4();
        let a = format!("order-{order_id}");
        let b = format!("order-{order_id}");
        assert_eq!(a, b);
    }

    #[test]
    fn test_line_items_from_cart_rows() {
        let items = vec![
            detail("Case fan", Decimal::new(1000, 2), 2),
            detail("Thermal paste", Decimal::new(2500, 2), 1),
        ];

        let line_items = build_line_items(&items).unwrap();

        assert_eq!(line_items[0].unit_amount, 1000);
        assert_eq!(line_items[0].quantity, 2);
        assert_eq!(line_items[1].unit_amount, 2500);
        assert_eq!(line_items[1].quantity, 1);

        let total: i64 = line_items.iter().map(|l| l.unit_amount * l.quantity).sum();
        assert_eq!(total, 4500);
    }

    #[tokio::test]
    async fn test_confirm_rejects_session_without_order_reference() {
        let svc = service(CheckoutSession {
            id: "cs_no_meta".to_string(),
            url: None,
            payment_status: Some("paid".to_string()),
            metadata: HashMap::new(),
        });
        let ctx = RequestContext::new(Uuid::new_v4(), "ext_buyer".to_string(), UserRole::User);

        let err = svc.confirm(&ctx, "cs_no_meta").await.unwrap_err();
        assert_eq!(err.kind, rigmart_core::error::ErrorKind::NotFound);
    }
}
