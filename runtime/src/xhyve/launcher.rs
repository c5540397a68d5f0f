//! Hypervisor process launch.

use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

use corex_core::{CoreError, Result};

use super::command::build_args;
use super::kernel::KernelConfig;
use super::spec::LaunchSpec;

/// Spawn the hypervisor with the spec's argument vector and wait for it
/// to exit. Standard streams are inherited so the guest's serial console
/// lands on the invoking terminal.
pub async fn launch(spec: &LaunchSpec, kernel: &KernelConfig) -> Result<ExitStatus> {
    let args = build_args(spec, kernel);
    tracing::debug!(
        hypervisor = %spec.hypervisor.display(),
        args = %args.join(" "),
        "Executing hypervisor"
    );

    let mut child = Command::new(&spec.hypervisor)
        .args(&args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| {
            CoreError::Launch(format!(
                "failed to spawn {}: {e}",
                spec.hypervisor.display()
            ))
        })?;

    child
        .wait()
        .await
        .map_err(|e| CoreError::Launch(format!("failed waiting for hypervisor: {e}")))
}
