use std::time::Duration;

use parlint::errors::Result;
use parlint::exec::ExternalCommand;

use crate::with_timeout;

/// Pause between two polling rounds; lets the IO driver make progress.
pub const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Minimal stand-in for the real dispatcher: poll output and completion
/// until the command reports finished.
pub async fn drive_to_completion<C>(command: &mut C) -> Result<()>
where
    C: ExternalCommand + ?Sized,
{
    with_timeout(async {
        loop {
            command.poll_output().await?;
            if command.poll_finished().await? {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await
}

/// Poll every command in turn until all of them are finished.
pub async fn drive_all(commands: &mut [Box<dyn ExternalCommand>]) -> Result<()> {
    with_timeout(async {
        loop {
            let mut all_finished = true;
            for command in commands.iter_mut() {
                command.poll_output().await?;
                all_finished &= command.poll_finished().await?;
            }
            if all_finished {
                return Ok(());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    })
    .await
}
