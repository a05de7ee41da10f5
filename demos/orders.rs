//! # Example: orders
//!
//! Wires a shared channel between a background polling loop, a job runner and
//! two subscribers, the way a small worker service would.
//!
//! Shows how to:
//! - Build a [`Registry`] once and hand it to every subsystem.
//! - Subscribe [`LogWriter`] with the empty prefix to log all traffic.
//! - Recover from [`BusError::DuplicateName`] by looking the channel up.
//! - Drain in-flight deliveries on shutdown.
//!
//! ## Flow
//! ```text
//! poll_alerts ──► publish("alert.<account>")   ─┐
//! run_job     ──► publish("job.progress"/"job.done")
//!                                               ▼
//!                                   Channel "fleet"
//!                                    ├─► ""      LogWriter
//!                                    └─► "job."  JobNotifier (fails on purpose once)
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=info,prefixbus=debug cargo run --example orders
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use prefixbus::{
    BusError, Config, Event, LogWriter, Payload, Registry, Subscribe, SubscriberError,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Progress report published by the job runner.
#[derive(Debug)]
struct JobProgress {
    job: &'static str,
    percent: u8,
}

/// Posts job updates to a chat channel (here: stdout).
struct JobNotifier;

#[async_trait]
impl Subscribe for JobNotifier {
    async fn on_event(&self, ev: &Event) -> Result<(), SubscriberError> {
        let Some(progress) = ev.payload().downcast_ref::<JobProgress>() else {
            return Err(SubscriberError::fail(format!(
                "unexpected payload on {}",
                ev.name()
            )));
        };
        println!("[notify] {} {} {}%", ev.name(), progress.job, progress.percent);
        Ok(())
    }

    fn name(&self) -> &str {
        "job-notifier"
    }
}

async fn poll_alerts(registry: Arc<Registry>, rounds: u32) -> Result<(), BusError> {
    let bus = registry.channel("fleet").await?;
    for round in 0..rounds {
        for account in ["north", "south"] {
            bus.publish(format!("alert.{account}"), Payload::new(round)).await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    Ok(())
}

async fn run_job(registry: Arc<Registry>) -> Result<(), BusError> {
    let bus = registry.channel("fleet").await?;
    for percent in [0, 50, 100] {
        bus.publish(
            "job.progress",
            Payload::new(JobProgress {
                job: "refresh-prices",
                percent,
            }),
        )
        .await;
        tokio::time::sleep(Duration::from_millis(30)).await;
    }
    // no payload: JobNotifier reports an error, nothing else is affected
    bus.publish("job.done", ()).await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,prefixbus=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let registry = Registry::new(Config {
        drain_grace: Duration::from_secs(2),
        ..Config::default()
    });

    let fleet = registry.create_channel("fleet").await?;
    fleet.subscribe("", Arc::new(LogWriter::new())).await;
    fleet.subscribe("job.", Arc::new(JobNotifier)).await;

    // a second subsystem racing to create the same bus falls back to lookup
    let shared = match registry.create_channel("fleet").await {
        Ok(ch) => ch,
        Err(BusError::DuplicateName { name }) => registry.channel(&name).await?,
        Err(e) => return Err(e.into()),
    };
    assert!(Arc::ptr_eq(&fleet, &shared));

    let (alerts, job) = tokio::join!(
        poll_alerts(Arc::clone(&registry), 3),
        run_job(Arc::clone(&registry)),
    );
    alerts?;
    job?;

    registry.shutdown().await?;
    println!(
        "done: channels={:?} prefixes={:?}",
        registry.list().await,
        fleet.prefixes().await
    );
    Ok(())
}
