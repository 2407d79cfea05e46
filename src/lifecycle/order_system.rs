use crate::clients::OrderManagerClient;
use crate::framework::OrderManagerActor;
use crate::lifecycle::{ConfigError, OrderManagerConfig};
use crate::order_actor::OrderContext;
use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// A running order manager for one venue.
///
/// `OrderManagerSystem` is responsible for:
/// - **Start-up**: validating config, creating the actor and spawning it with
///   its collaborators
/// - **Shutdown**: signalling the actor and waiting for its task
///
/// # Example
///
/// ```ignore
/// let system = OrderManagerSystem::start(&config, context, CancellationToken::new())?;
/// let order_id = system.client.create_and_route(params).await?;
/// system.shutdown().await?;
/// ```
pub struct OrderManagerSystem {
    /// Client for the running actor. Clone it to share between tasks.
    pub client: OrderManagerClient,

    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl OrderManagerSystem {
    /// Spawns the actor on the current Tokio runtime.
    ///
    /// The actor stops when `shutdown` is cancelled, when a client calls
    /// `close`, or when [`OrderManagerSystem::shutdown`] is called.
    pub fn start(
        config: &OrderManagerConfig,
        context: OrderContext,
        shutdown: CancellationToken,
    ) -> Result<Self, ConfigError> {
        let (actor, client) = OrderManagerActor::new(config)?;
        Ok(Self::spawn(actor, client, context, shutdown))
    }

    /// Spawns an already built actor, e.g. one with a custom id generator.
    pub fn spawn(
        actor: OrderManagerActor,
        client: OrderManagerClient,
        context: OrderContext,
        shutdown: CancellationToken,
    ) -> Self {
        let handle = tokio::spawn(actor.run(context, shutdown.clone()));
        Self {
            client,
            shutdown,
            handle,
        }
    }

    /// Stops the actor and waits for it to finish.
    ///
    /// Commands still queued at this point are dropped unanswered.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down order manager...");
        self.shutdown.cancel();
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Order manager task failed: {:?}", e);
            return Err(e);
        }

        info!("Order manager shutdown complete.");
        Ok(())
    }
}
