//! 房间监控器

use crate::core::capture::RoomCapture;
use crate::core::monitor::{ConfigError, CycleReport, MonitorConfig, MonitorManager, MonitorStats};
use crate::core::notify::Delivery;
use crate::core::room::RoomKey;
use log::info;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 房间监控器 - 每次运行创建一次，外部调度器每个周期调用一次 `run_cycle`
///
/// ```ignore
/// let monitor = RoomMonitor::from_config_file(Path::new("roadwatch.json5"))?;
/// let mut capture = SnapshotDirCapture::new("/var/snapshots", &monitor.config().marker_selector)?;
/// let mut delivery = TelegramDelivery::new(monitor.config().telegram.clone())?;
/// loop {
///     monitor.run_cycle(&mut capture, &mut delivery);
///     std::thread::sleep(monitor.poll_interval());
/// }
/// ```
pub struct RoomMonitor {
    config: MonitorConfig,
    manager: Mutex<MonitorManager>,
    stats: Arc<Mutex<MonitorStats>>,
}

impl RoomMonitor {
    pub fn create(config: MonitorConfig) -> Result<Self, ConfigError> {
        crate::init_logging();
        config.validate()?;

        let manager = MonitorManager::new(&config);
        let stats = manager.stats_handle();
        info!(
            "🎬 RoomMonitor: created for {} rooms across {} camps",
            manager.rooms().len(),
            config.camps.len()
        );

        Ok(Self {
            config,
            manager: Mutex::new(manager),
            stats,
        })
    }

    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        info!("📄 Loading config from {:?}", path);
        Self::create(MonitorConfig::load(path)?)
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn rooms(&self) -> Vec<RoomKey> {
        self.config.rooms()
    }

    /// 轮询间隔，仅供外部调度器使用
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.config.poll_interval_secs)
    }

    /// 执行一个周期，周期内独占管理器
    pub fn run_cycle(
        &self,
        capture: &mut dyn RoomCapture,
        delivery: &mut dyn Delivery,
    ) -> CycleReport {
        let mut manager = match self.manager.lock() {
            Ok(manager) => manager,
            Err(poisoned) => poisoned.into_inner(),
        };
        manager.run_cycle(capture, delivery)
    }

    pub fn stats(&self) -> MonitorStats {
        match self.stats.lock() {
            Ok(stats) => stats.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn stats_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.stats())
    }
}

impl Drop for RoomMonitor {
    fn drop(&mut self) {
        info!("🗑️ RoomMonitor: released");
    }
}
