mod common;

use common::{buy_params, live_order, Harness, LISTING_ID};
use rust_decimal_macros::dec;
use venue_order_manager::framework::Operation;
use venue_order_manager::mock::{GatewayCall, MockListingResolver};
use venue_order_manager::model::{
    CancelParams, ModifyParams, OrderId, OrderStateError, OrderStatus,
};
use venue_order_manager::order_actor::OrderError;
use venue_order_manager::ports::{GatewayError, ResolveError, StoreError};

/// Real order actor with recording store, gateway and resolver.
#[tokio::test]
async fn create_and_route_persists_live_target_and_sends() {
    let mut h = Harness::new();
    h.start();

    let order_id = h.client.create_and_route(buy_params()).await.unwrap();
    assert!(!order_id.as_str().is_empty());

    let order = h.store.order(&order_id).await.expect("order stored");
    assert_eq!(order.target_status(), OrderStatus::Live);
    assert_eq!(order.status(), OrderStatus::None);
    assert_eq!(order.quantity, dec!(100));
    assert_eq!(order.price, dec!(10.00));
    assert_eq!(order.listing_id, LISTING_ID);

    assert_eq!(h.resolver.requests(), vec![LISTING_ID]);
    assert_eq!(
        h.gateway.calls(),
        vec![GatewayCall::Send {
            order_id,
            listing_id: LISTING_ID
        }]
    );
}

#[tokio::test]
async fn unknown_order_is_not_found_everywhere() {
    let mut h = Harness::new();
    h.start();
    let missing = OrderId::from("missing");

    let results = vec![
        h.client
            .modify(ModifyParams {
                order_id: missing.clone(),
                quantity: dec!(1),
                price: dec!(1),
            })
            .await,
        h.client
            .cancel(CancelParams {
                order_id: missing.clone(),
            })
            .await,
        h.client.set_status(missing.clone(), OrderStatus::Live).await,
        h.client.set_error_msg(missing.clone(), "boom").await,
        h.client
            .add_execution(missing.clone(), dec!(10), dec!(1), "e1")
            .await,
    ];

    for result in results {
        let err = result.unwrap_err();
        assert!(matches!(err, OrderError::NotFound { .. }), "got {err:?}");
        assert_eq!(err.order_id(), Some(&missing));
    }
    assert!(h.store.writes().is_empty());
    assert!(h.gateway.calls().is_empty());
    assert!(h.resolver.requests().is_empty());
}

#[tokio::test]
async fn resolver_failure_leaves_order_persisted_but_unrouted() {
    let mut h = Harness::new();
    h.resolver
        .fail_next(ResolveError::Unavailable("reference data down".into()));
    h.start();

    let err = h.client.create_and_route(buy_params()).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::Resolution {
            operation: Operation::CreateAndRoute,
            listing_id: LISTING_ID,
            ..
        }
    ));

    let written = h.store.written_ids();
    assert_eq!(written.len(), 1);
    assert_eq!(err.order_id(), Some(&written[0]));
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn unknown_listing_fails_resolution() {
    let mut h = Harness::with_resolver(MockListingResolver::new([]));
    h.start();

    let err = h.client.create_and_route(buy_params()).await.unwrap_err();
    match err {
        OrderError::Resolution { source, .. } => {
            assert_eq!(source, ResolveError::NotFound(LISTING_ID))
        }
        other => panic!("expected resolution error, got {other:?}"),
    }
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn gateway_failure_on_create_reports_the_stored_order() {
    let mut h = Harness::new();
    h.gateway
        .fail_next(GatewayError::Rejected("market closed".into()));
    h.start();

    let err = h.client.create_and_route(buy_params()).await.unwrap_err();
    assert!(matches!(err, OrderError::Gateway { .. }));

    let id = err.order_id().cloned().expect("gateway error carries order id");
    let stored = h.store.order(&id).await.expect("order persisted before routing");
    assert_eq!(stored.target_status(), OrderStatus::Live);
    assert_eq!(h.gateway.calls().len(), 1);
}

#[tokio::test]
async fn store_failure_on_create_stops_before_routing() {
    let mut h = Harness::new();
    h.store
        .fail_next_store(StoreError::Backend("disk full".into()));
    h.start();

    let err = h.client.create_and_route(buy_params()).await.unwrap_err();
    assert!(matches!(
        err,
        OrderError::Store {
            operation: Operation::CreateAndRoute,
            ..
        }
    ));
    assert!(h.store.writes().is_empty());
    assert!(h.resolver.requests().is_empty());
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn store_read_failure_is_reported() {
    let mut h = Harness::new();
    h.store.insert(live_order("o-1", dec!(100))).await;
    h.store
        .fail_next_get(StoreError::Backend("connection reset".into()));
    h.start();

    let err = h
        .client
        .cancel(CancelParams {
            order_id: OrderId::from("o-1"),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Store {
            operation: Operation::Cancel,
            ..
        }
    ));
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn store_read_failure_aborts_error_message_update() {
    let mut h = Harness::new();
    let id = OrderId::from("o-1");
    h.store.insert(live_order("o-1", dec!(100))).await;
    h.store
        .fail_next_get(StoreError::Backend("connection reset".into()));
    h.start();

    let err = h
        .client
        .set_error_msg(id.clone(), "venue reject")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Store {
            operation: Operation::SetErrorMsg,
            ..
        }
    ));
    assert_eq!(err.order_id(), Some(&id));
    assert!(h.store.writes().is_empty());

    let order = h.store.order(&id).await.unwrap();
    assert_eq!(order.error_message, None);
}

#[tokio::test]
async fn id_generation_failure_is_internal() {
    let mut h = Harness::new();
    let actor = h.actor.take().unwrap();
    h.actor = Some(actor.with_id_generator(|| Err("id source exhausted".into())));
    h.start();

    let err = h.client.create_and_route(buy_params()).await.unwrap_err();
    assert_eq!(err, OrderError::Internal("id source exhausted".into()));
    assert_eq!(err.order_id(), None);
    assert!(h.store.writes().is_empty());
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn custom_id_generator_is_used() {
    let mut h = Harness::new();
    let actor = h.actor.take().unwrap();
    h.actor = Some(actor.with_id_generator(|| Ok(OrderId::from("fixed-1"))));
    h.start();

    let id = h.client.create_and_route(buy_params()).await.unwrap();
    assert_eq!(id, OrderId::from("fixed-1"));
}

#[tokio::test]
async fn executions_sum_and_duplicates_are_rejected() {
    let mut h = Harness::new();
    let id = OrderId::from("o-1");
    h.store.insert(live_order("o-1", dec!(100))).await;
    h.start();

    h.client
        .add_execution(id.clone(), dec!(10.00), dec!(30), "e1")
        .await
        .unwrap();
    h.client
        .add_execution(id.clone(), dec!(10.10), dec!(20), "e2")
        .await
        .unwrap();

    let err = h
        .client
        .add_execution(id.clone(), dec!(10.00), dec!(30), "e1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Validation {
            source: OrderStateError::DuplicateExecution(_),
            ..
        }
    ));

    let order = h.store.order(&id).await.unwrap();
    assert_eq!(order.traded_quantity(), dec!(50));
    assert_eq!(order.executions().len(), 2);
    assert_eq!(order.status(), OrderStatus::Live);
    assert_eq!(h.store.writes().len(), 2);
}

#[tokio::test]
async fn final_execution_fills_the_order() {
    let mut h = Harness::new();
    let id = OrderId::from("o-1");
    h.store.insert(live_order("o-1", dec!(10))).await;
    h.start();

    h.client
        .add_execution(id.clone(), dec!(10), dec!(10), "e1")
        .await
        .unwrap();

    let order = h.store.order(&id).await.unwrap();
    assert_eq!(order.status(), OrderStatus::Filled);

    let err = h
        .client
        .cancel(CancelParams { order_id: id })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Validation {
            source: OrderStateError::Terminal { .. },
            ..
        }
    ));
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn cancel_marks_target_then_routes() {
    let mut h = Harness::new();
    let id = OrderId::from("o-1");
    h.store.insert(live_order("o-1", dec!(100))).await;
    h.start();

    h.client
        .cancel(CancelParams {
            order_id: id.clone(),
        })
        .await
        .unwrap();

    let order = h.store.order(&id).await.unwrap();
    assert_eq!(order.target_status(), OrderStatus::Cancelled);
    assert_eq!(order.status(), OrderStatus::Live);
    assert_eq!(h.gateway.calls(), vec![GatewayCall::Cancel { order_id: id }]);
    assert!(h.resolver.requests().is_empty());
}

#[tokio::test]
async fn cancel_gateway_failure_keeps_cancel_pending() {
    let mut h = Harness::new();
    let id = OrderId::from("o-1");
    h.store.insert(live_order("o-1", dec!(100))).await;
    h.gateway
        .fail_next(GatewayError::Unavailable("session down".into()));
    h.start();

    let err = h
        .client
        .cancel(CancelParams {
            order_id: id.clone(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.order_id(), Some(&id));
    assert_eq!(err.operation(), Some(Operation::Cancel));

    let order = h.store.order(&id).await.unwrap();
    assert_eq!(order.target_status(), OrderStatus::Cancelled);
}

#[tokio::test]
async fn modify_uses_stored_listing_and_new_terms() {
    let mut h = Harness::new();
    let id = OrderId::from("o-1");
    h.store.insert(live_order("o-1", dec!(100))).await;
    h.start();

    h.client
        .modify(ModifyParams {
            order_id: id.clone(),
            quantity: dec!(150),
            price: dec!(10.25),
        })
        .await
        .unwrap();

    let order = h.store.order(&id).await.unwrap();
    assert_eq!(order.quantity, dec!(150));
    assert_eq!(order.price, dec!(10.25));
    assert_eq!(order.target_status(), OrderStatus::Live);
    assert_eq!(h.resolver.requests(), vec![LISTING_ID]);
    assert_eq!(
        h.gateway.calls(),
        vec![GatewayCall::Modify {
            order_id: id,
            listing_id: LISTING_ID,
            quantity: dec!(150),
            price: dec!(10.25),
        }]
    );
}

#[tokio::test]
async fn modify_rejected_while_cancel_pending() {
    let mut h = Harness::new();
    let id = OrderId::from("o-1");
    let mut order = live_order("o-1", dec!(100));
    order.set_target_status(OrderStatus::Cancelled).unwrap();
    h.store.insert(order).await;
    h.start();

    let err = h
        .client
        .modify(ModifyParams {
            order_id: id.clone(),
            quantity: dec!(50),
            price: dec!(9),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Validation {
            source: OrderStateError::CancelPending { .. },
            ..
        }
    ));

    let stored = h.store.order(&id).await.unwrap();
    assert_eq!(stored.quantity, dec!(100));
    assert!(h.store.writes().is_empty());
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn venue_acknowledgement_clears_target() {
    let mut h = Harness::new();
    h.start();

    let id = h.client.create_and_route(buy_params()).await.unwrap();
    h.client.set_status(id.clone(), OrderStatus::Live).await.unwrap();
    h.client
        .set_error_msg(id.clone(), "partial reject on leg 2")
        .await
        .unwrap();

    let order = h.store.order(&id).await.unwrap();
    assert_eq!(order.status(), OrderStatus::Live);
    assert_eq!(order.target_status(), OrderStatus::None);
    assert_eq!(order.error_message.as_deref(), Some("partial reject on leg 2"));
}

#[tokio::test]
async fn modify_below_traded_quantity_is_rejected() {
    let mut h = Harness::new();
    let id = OrderId::from("o-1");
    h.store.insert(live_order("o-1", dec!(100))).await;
    h.start();

    h.client
        .add_execution(id.clone(), dec!(10), dec!(60), "e1")
        .await
        .unwrap();

    let err = h
        .client
        .modify(ModifyParams {
            order_id: id.clone(),
            quantity: dec!(40),
            price: dec!(10),
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Validation {
            operation: Operation::Modify,
            source: OrderStateError::BelowTraded { .. },
            ..
        }
    ));
    assert!(h.gateway.calls().is_empty());

    let order = h.store.order(&id).await.unwrap();
    assert_eq!(order.quantity, dec!(100));
    assert_eq!(order.remaining_quantity(), dec!(40));

    h.client
        .add_execution(id.clone(), dec!(10), dec!(40), "e2")
        .await
        .unwrap();
    let order = h.store.order(&id).await.unwrap();
    assert_eq!(order.status(), OrderStatus::Filled);
}

#[tokio::test]
async fn modify_down_to_traded_quantity_fills_the_order() {
    let mut h = Harness::new();
    let id = OrderId::from("o-1");
    h.store.insert(live_order("o-1", dec!(100))).await;
    h.start();

    h.client
        .add_execution(id.clone(), dec!(10), dec!(60), "e1")
        .await
        .unwrap();
    h.client
        .modify(ModifyParams {
            order_id: id.clone(),
            quantity: dec!(60),
            price: dec!(10),
        })
        .await
        .unwrap();

    let order = h.store.order(&id).await.unwrap();
    assert_eq!(order.quantity, dec!(60));
    assert_eq!(order.status(), OrderStatus::Filled);
    assert_eq!(order.target_status(), OrderStatus::None);

    let err = h
        .client
        .add_execution(id, dec!(10), dec!(1), "e2")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Validation {
            source: OrderStateError::Terminal { .. },
            ..
        }
    ));
}
