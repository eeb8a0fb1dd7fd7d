use nix::sys::signal::{self as nix_signal, Signal as NixSignal};
use nix::unistd::Pid;
use std::process::ExitStatus;
use tokio::process::Child;
use tokio::signal::unix::{signal, Signal, SignalKind};
use tracing::{debug, info, warn};

use crate::error::LaunchError;

/// Relays termination signals aimed at the launcher to the paraevo process.
///
/// paraevo runs in its own process group, so this is the only way a
/// terminal Ctrl+C reaches it.
pub struct SignalForwarder {
    sigterm: Signal,
    sigint: Signal,
}

impl SignalForwarder {
    pub fn new() -> Result<Self, LaunchError> {
        let sigterm = signal(SignalKind::terminate()).map_err(LaunchError::Signal)?;
        let sigint = signal(SignalKind::interrupt()).map_err(LaunchError::Signal)?;

        Ok(SignalForwarder { sigterm, sigint })
    }

    /// Waits for the child to exit, forwarding SIGINT/SIGTERM to it meanwhile.
    pub async fn wait_for_exit(&mut self, child: &mut Child) -> Result<ExitStatus, LaunchError> {
        loop {
            let received = tokio::select! {
                status = child.wait() => return status.map_err(LaunchError::Wait),
                Some(()) = self.sigint.recv() => ForwardedSignal::Interrupt,
                Some(()) = self.sigterm.recv() => ForwardedSignal::Terminate,
            };

            info!("{}, forwarding to paraevo", received.description());
            match child.id() {
                Some(pid) => forward_signal(pid, received),
                None => debug!("Child already reaped, nothing to forward"),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardedSignal {
    Interrupt,
    Terminate,
}

impl ForwardedSignal {
    pub fn description(&self) -> &'static str {
        match self {
            ForwardedSignal::Interrupt => "SIGINT (Ctrl+C) received",
            ForwardedSignal::Terminate => "SIGTERM received (likely from systemctl)",
        }
    }

    fn as_nix(self) -> NixSignal {
        match self {
            ForwardedSignal::Interrupt => NixSignal::SIGINT,
            ForwardedSignal::Terminate => NixSignal::SIGTERM,
        }
    }
}

fn forward_signal(pid: u32, received: ForwardedSignal) {
    let Ok(raw_pid) = i32::try_from(pid) else {
        warn!("Child pid {} out of range, cannot forward signal", pid);
        return;
    };

    // ESRCH here only means the child exited between wait() and kill()
    if let Err(e) = nix_signal::kill(Pid::from_raw(raw_pid), received.as_nix()) {
        warn!("Failed to forward {:?} to pid {}: {}", received.as_nix(), pid, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use tokio::process::Command;

    #[test]
    fn test_signal_mapping() {
        assert_eq!(ForwardedSignal::Interrupt.as_nix(), NixSignal::SIGINT);
        assert_eq!(ForwardedSignal::Terminate.as_nix(), NixSignal::SIGTERM);
    }

    #[tokio::test]
    async fn test_wait_returns_child_status() {
        let mut forwarder = SignalForwarder::new().unwrap();
        let mut child = Command::new("sh").arg("-c").arg("exit 4").spawn().unwrap();

        let status = forwarder.wait_for_exit(&mut child).await.unwrap();
        assert_eq!(status.code(), Some(4));
    }

    #[tokio::test]
    async fn test_forwarded_signal_reaches_child() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id().unwrap();

        forward_signal(pid, ForwardedSignal::Terminate);

        let status = child.wait().await.unwrap();
        assert_eq!(status.signal(), Some(NixSignal::SIGTERM as i32));
    }
}
