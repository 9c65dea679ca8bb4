//! Entry point for the **wintile** daemon.
//!
//! Builds the Hyprland backend chain, spawns the Unix socket
//! [`CommandSource`](wintile::traits::CommandSource) on a background thread
//! and processes incoming commands on the main thread.

use wintile::command::Command;
use wintile::config::Config;
use wintile::hyprland::HyprlandSystem;
use wintile::ipc::UnixSocketListener;
use wintile::manager::convert::ConvertWindowManager;
use wintile::manager::native::NativeWindowManager;
use wintile::tiler::Tiler;
use wintile::traits::{CommandSource, WindowManager};
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

/// Try to load the config from `$XDG_CONFIG_HOME/wintile/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = Config::default_path();
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

fn main() {
    env_logger::init();

    let config = load_config();

    // Pixels with decoration -> content pixels -> percent of the work area.
    let system = HyprlandSystem::with_policy(config.border);
    let native: Arc<dyn WindowManager> = Arc::new(ConvertWindowManager::new(
        NativeWindowManager::with_policy(system, config.border),
        system,
    ));

    let mut tiler = Tiler::new(config.layout(), native);
    info!(
        "grid {}x{}, {} hotkey binding(s)",
        config.grid.columns,
        config.grid.rows,
        tiler.layout().bindings().count()
    );

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_listener(config.socket_path(), cmd_tx);

    info!("wintile running");
    for cmd in cmd_rx {
        if let Err(e) = tiler.handle(cmd.clone()) {
            warn!("{:?} had no effect: {}", cmd, e);
        }
    }
    info!("command listener closed, exiting");
}

fn spawn_listener(path: PathBuf, tx: mpsc::Sender<Command>) {
    std::thread::spawn(move || {
        let mut source = UnixSocketListener::new(&path);
        if let Err(e) = source.run(tx) {
            error!("socket listener error: {}", e);
        }
    });
}
