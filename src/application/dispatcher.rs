// Command dispatch - One task owns the chart manager, user actions queue up
use crate::application::chart_manager::ChartManager;
use crate::application::errors::{DashboardError, DashboardResult};
use crate::domain::period::WindowPeriod;
use crate::domain::sample::Sample;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, error, info};

#[derive(Debug, Clone)]
pub enum DashboardCommand {
    /// A period button was pressed.
    SelectPeriod { device: String, period: WindowPeriod },
    /// Latest sample per device from the live feed.
    LiveUpdate(HashMap<String, Sample>),
}

#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<DashboardCommand>,
}

pub fn channel(capacity: usize) -> (CommandSender, mpsc::Receiver<DashboardCommand>) {
    let (tx, rx) = mpsc::channel(capacity);
    (CommandSender { tx }, rx)
}

/// Queues commands without waiting. While the dispatcher is busy (initial
/// loads or a retrying switch) the queue fills and callers get
/// `DispatcherBusy` instead of blocking.
impl CommandSender {
    pub fn select_period(&self, device: String, period: WindowPeriod) -> DashboardResult<()> {
        self.send(DashboardCommand::SelectPeriod { device, period })
    }

    pub fn live_update(&self, update: HashMap<String, Sample>) -> DashboardResult<()> {
        self.send(DashboardCommand::LiveUpdate(update))
    }

    fn send(&self, command: DashboardCommand) -> DashboardResult<()> {
        self.tx.try_send(command).map_err(|e| match e {
            TrySendError::Full(_) => DashboardError::DispatcherBusy,
            TrySendError::Closed(_) => DashboardError::DispatcherClosed,
        })
    }
}

/// Initialise the charts, then apply commands in arrival order until every
/// sender is dropped.
pub async fn run(
    mut manager: ChartManager,
    devices: Vec<String>,
    mut commands: mpsc::Receiver<DashboardCommand>,
) {
    if let Err(e) = manager.initialize(&devices).await {
        error!("Chart initialization aborted: {}", e);
        return;
    }

    while let Some(command) = commands.recv().await {
        match command {
            DashboardCommand::SelectPeriod { device, period } => {
                let outcome = manager.switch_period(&device, period).await;
                debug!("Period switch for {} to {}: {:?}", device, period, outcome);
            }
            DashboardCommand::LiveUpdate(update) => {
                let appended = manager.apply_live_update(&update);
                debug!("Live update for {} devices appended {} points", update.len(), appended);
            }
        }
    }

    info!("Command channel closed, chart dispatcher stopped");
}
