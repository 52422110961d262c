//! hotkey-toggle: a native window that hides until a global hotkey
//!
//! Creates one top-level window, attaches the visibility controller to it
//! and pumps window messages while the window is visible:
//! - close button: hides the window and re-arms the show hotkey
//! - show hotkey (default alt+space): brings the window back
//! - exit combination (default ctrl+c, while visible): ends the process

use anyhow::Result;
use tokio::task::LocalSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hotkey_toggle::HotkeyConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "hotkey-toggle starting");

    // Load configuration
    let config = HotkeyConfig::load()?;
    info!(?config, "configuration loaded");

    // The controller and its window live on this thread only
    let local = LocalSet::new();
    local.run_until(run(config)).await?;

    info!("hotkey-toggle stopped");
    Ok(())
}

#[cfg(windows)]
async fn run(config: HotkeyConfig) -> Result<()> {
    use std::rc::Rc;
    use std::time::Duration;

    use anyhow::Context;
    use tokio::sync::broadcast;
    use tracing::warn;

    use hotkey_toggle::host::LocalScheduler;
    use hotkey_toggle::platform::{pump_pending, NativeWindow, Win32Backend};
    use hotkey_toggle::{BroadcastObserver, LifecycleEvent, VisibilityController};

    let (event_tx, mut event_rx) = broadcast::channel::<LifecycleEvent>(16);

    let window = NativeWindow::create("hotkey-toggle", 480, 320).context("failed to create window")?;
    let controller = VisibilityController::builder(
        Rc::new(window),
        Rc::new(LocalScheduler::new()),
        Rc::new(Win32Backend::new()),
    )
    .config(config)
    .observer(Rc::new(BroadcastObserver::new(event_tx)))
    .build();

    // Log lifecycle events as they come in
    tokio::task::spawn_local(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => info!(%event, "lifecycle event"),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "lifecycle event receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    controller
        .attach()
        .context("failed to attach hotkey controller")?;

    info!("entering message loop");

    // While hidden the listener task blocks this thread inside GetMessageW,
    // so this pump only runs while the window is visible.
    let mut ticker = tokio::time::interval(Duration::from_millis(16));
    loop {
        ticker.tick().await;
        if !pump_pending() {
            info!("received WM_QUIT");
            break;
        }
    }

    Ok(())
}

#[cfg(not(windows))]
async fn run(_config: HotkeyConfig) -> Result<()> {
    use hotkey_toggle::hotkey::HotkeyBackend;
    use hotkey_toggle::platform::Win32Backend;
    use tracing::error;

    if let Err(e) = Win32Backend::new().check_platform() {
        error!(error = %e, "cannot start");
        panic!("{e}");
    }
    Ok(())
}
