//! Demo: runs one order through its lifecycle against a simulated venue.

use rust_decimal::Decimal;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Instrument};
use venue_order_manager::lifecycle::{setup_tracing, OrderManagerConfig, OrderManagerSystem};
use venue_order_manager::model::{
    CancelParams, CreateAndRouteParams, Listing, ModifyParams, OrderStatus, Side,
};
use venue_order_manager::order_actor::OrderContext;
use venue_order_manager::ports::{MemoryOrderStore, SimulatedGateway, StaticListingResolver};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = OrderManagerConfig::from_env().map_err(|e| e.to_string())?;
    info!(channel_capacity = config.channel_capacity, "Starting order manager");

    let context = OrderContext::new(
        Arc::new(MemoryOrderStore::new()),
        Arc::new(SimulatedGateway),
        Arc::new(StaticListingResolver::new([
            Listing::new(5, "ACME", "XNAS"),
            Listing::new(7, "GLOBX", "XLON"),
        ])),
    );
    let system = OrderManagerSystem::start(&config, context, CancellationToken::new())
        .map_err(|e| e.to_string())?;
    let client = system.client.clone();

    let params = CreateAndRouteParams {
        side: Side::Buy,
        quantity: Decimal::from(100),
        price: Decimal::new(1000, 2),
        listing_id: 5,
        originator_id: "desk-1".to_string(),
        originator_ref: "ref-001".to_string(),
        root_originator_id: "desk-1".to_string(),
        root_originator_ref: "ref-001".to_string(),
        destination: "XNAS".to_string(),
    };

    let span = tracing::info_span!("order_lifecycle");
    let result = async {
        let order_id = client.create_and_route(params).await?;
        client.set_status(order_id.clone(), OrderStatus::Live).await?;
        client
            .add_execution(order_id.clone(), Decimal::new(1000, 2), Decimal::from(40), "exec-1")
            .await?;
        client
            .modify(ModifyParams {
                order_id: order_id.clone(),
                quantity: Decimal::from(80),
                price: Decimal::new(1005, 2),
            })
            .await?;
        client
            .cancel(CancelParams {
                order_id: order_id.clone(),
            })
            .await?;
        client.set_status(order_id.clone(), OrderStatus::Cancelled).await?;
        Ok::<_, venue_order_manager::order_actor::OrderError>(order_id)
    }
    .instrument(span)
    .await;

    match result {
        Ok(order_id) => info!(%order_id, "Order lifecycle completed"),
        Err(e) => error!(error = %e, "Order lifecycle failed"),
    }

    drop(client);
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
