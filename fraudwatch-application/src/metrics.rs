use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    commands: AtomicU64,
    command_errors: AtomicU64,
    auto_ticks: AtomicU64,
    snapshot_loads: AtomicU64,
}

impl Metrics {
    pub fn record_command(&self) {
        self.commands.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_command_error(&self) {
        self.command_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_auto_tick(&self) {
        self.auto_ticks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_snapshot_load(&self) {
        self.snapshot_loads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let commands = self.commands.load(Ordering::Relaxed);
        let errors = self.command_errors.load(Ordering::Relaxed);
        let ticks = self.auto_ticks.load(Ordering::Relaxed);
        let loads = self.snapshot_loads.load(Ordering::Relaxed);

        format!(
            "# TYPE fraudwatch_sim_commands_total counter\n\
fraudwatch_sim_commands_total {}\n\
# TYPE fraudwatch_sim_command_errors_total counter\n\
fraudwatch_sim_command_errors_total {}\n\
# TYPE fraudwatch_sim_auto_ticks_total counter\n\
fraudwatch_sim_auto_ticks_total {}\n\
# TYPE fraudwatch_snapshot_loads_total counter\n\
fraudwatch_snapshot_loads_total {}\n",
            commands, errors, ticks, loads
        )
    }
}
