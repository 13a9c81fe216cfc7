//! Startup orchestration and runtime supervision.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use saldo_config::Settings;
use saldo_core::eligible_balances;
use saldo_monobank::MonobankClient;
use saldo_registry::{Registry, SinkError, TotalSink};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::server;
use crate::telemetry;
use crate::tracker::{Tracker, TrackerMessage};

/// Aggregate bank balance tracker fed by provider webhooks.
#[derive(Debug, Parser)]
#[command(name = "saldo", version, about)]
struct Cli {
    /// Path to a TOML settings file; SALDO_* environment variables override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Binary entry point: parse arguments, install telemetry, run the service.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init();
    let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    let app = App::start(settings).await?;
    app.wait().await
}

/// Handles of the running service.
pub struct App {
    local_addr: SocketAddr,
    server: JoinHandle<hyper::Result<()>>,
    tracker: JoinHandle<Result<(), SinkError>>,
    resync: Option<JoinHandle<()>>,
}

impl App {
    /// Startup sequence: snapshot, seed, initial publish, webhook
    /// reconciliation, then the listener and tracker tasks. Any failure
    /// here is fatal; the service must not run half-synchronized.
    pub async fn start(settings: Settings) -> Result<Self> {
        let client = MonobankClient::new(
            &settings.api_base,
            &settings.token,
            settings.request_timeout(),
        )
        .context("building provider client")?;

        let profile = client
            .client_info()
            .await
            .context("fetching client profile")?;
        let registry =
            Registry::seed(eligible_balances(&profile)).context("seeding registry")?;
        info!(count = registry.len(), "seeded tracked balances");
        for entry in registry.iter() {
            debug!(id = %entry.id, balance = entry.balance, "tracking");
        }

        let sink = TotalSink::new(&settings.output);
        sink.publish(registry.total())
            .context("writing initial total")?;

        client
            .ensure_webhook(&profile.web_hook_url, &settings.webhook_url)
            .await
            .context("reconciling webhook registration")?;

        let (tracker, tx) = Tracker::new(registry, sink);
        let (local_addr, server) =
            server::spawn(settings.listen_addr, tx.clone()).context("binding webhook listener")?;
        let tracker = tokio::spawn(tracker.run());
        let resync = settings
            .resync_interval()
            .map(|interval| tokio::spawn(resync_loop(client, tx, interval)));

        Ok(Self {
            local_addr,
            server,
            tracker,
            resync,
        })
    }

    /// Address the listener actually bound; differs from the configured one
    /// when port 0 was requested.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Supervise until the listener or the tracker stops, or the process is
    /// interrupted. A stopped task is fatal either way.
    pub async fn wait(self) -> Result<()> {
        let App {
            server,
            tracker,
            resync,
            ..
        } = self;
        let result = tokio::select! {
            joined = server => match joined {
                Ok(Ok(())) => Err(anyhow!("webhook listener stopped unexpectedly")),
                Ok(Err(err)) => Err(err).context("webhook listener failed"),
                Err(err) => Err(err).context("webhook listener task panicked"),
            },
            joined = tracker => match joined {
                Ok(Ok(())) => Err(anyhow!("tracker stopped unexpectedly")),
                Ok(Err(err)) => Err(err).context("publishing total"),
                Err(err) => Err(err).context("tracker task panicked"),
            },
            signal = tokio::signal::ctrl_c() => {
                signal.context("listening for shutdown signal")?;
                info!("interrupt received; shutting down");
                Ok(())
            }
        };
        if let Some(handle) = resync {
            handle.abort();
        }
        result
    }
}

/// Periodically re-fetch the provider snapshot and feed the balances through
/// the tracker channel. Fetch failures are logged and skipped so the
/// webhook-fed state keeps serving.
async fn resync_loop(client: MonobankClient, tx: mpsc::Sender<TrackerMessage>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    ticker.tick().await; // the first tick completes immediately
    loop {
        ticker.tick().await;
        match client.client_info().await {
            Ok(profile) => {
                let updates = eligible_balances(&profile)
                    .into_iter()
                    .map(Into::into)
                    .collect();
                if tx.send(TrackerMessage::Resync(updates)).await.is_err() {
                    break;
                }
            }
            Err(err) => warn!(error = %err, "snapshot re-sync failed; keeping webhook-fed state"),
        }
    }
}
