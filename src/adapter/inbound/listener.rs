//! Operator stop triggers: a line on stdin, or Ctrl+C.

use std::io::{self, BufRead};
use std::thread;

use tracing::{debug, info, warn};

use crate::application::CancellationSignal;

/// Block until `reader` yields a line, then cancel.
///
/// Returns `true` if this call set the signal. End of input (stdin closed or
/// redirected from an empty file) is not a stop request.
pub fn wait_for_enter<R: BufRead>(mut reader: R, cancel: &CancellationSignal) -> bool {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => {
            debug!("stdin closed; Enter-to-stop unavailable");
            false
        }
        Ok(_) => {
            if cancel.is_cancelled() {
                return false;
            }
            info!("Stop requested from stdin");
            cancel.cancel();
            true
        }
        Err(err) => {
            warn!(error = %err, "Failed to read stdin");
            false
        }
    }
}

/// Watch stdin on a detached OS thread.
///
/// A blocking read would keep a runtime blocking-pool thread alive past the
/// end of the run, so this stays off the tokio runtime.
pub fn spawn_stdin_listener(cancel: CancellationSignal) {
    let spawned = thread::Builder::new()
        .name("stdin-listener".into())
        .spawn(move || {
            wait_for_enter(io::stdin().lock(), &cancel);
        });
    if let Err(err) = spawned {
        warn!(error = %err, "Failed to start stdin listener");
    }
}

/// Cancel on Ctrl+C. The task ends once the signal is set either way.
pub fn spawn_ctrl_c_listener(cancel: CancellationSignal) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    info!("Received Ctrl+C");
                    cancel.cancel();
                }
                Err(err) => warn!(error = %err, "Failed to listen for Ctrl+C"),
            },
            () = cancel.cancelled() => {}
        }
    })
}
