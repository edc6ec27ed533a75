//! Savings store maintenance

use crate::context::OpsCtx;
use crate::OperationResult;
use remod_errors::Error;
use remod_events::{AppEvent, EventEmitter, MetricsEvent};

/// Reset the accumulated savings to zero
///
/// Performs no relocation or installation side effects.
///
/// # Errors
///
/// Returns an error if an existing store file cannot be removed.
pub async fn clear_savings(ctx: &OpsCtx) -> Result<OperationResult, Error> {
    let path = ctx.store.path().to_path_buf();
    ctx.store.clear().await?;
    ctx.emit(AppEvent::Metrics(MetricsEvent::StoreCleared {
        path: path.clone(),
    }));
    Ok(OperationResult::Success(format!(
        "Cleared accumulated savings at {}",
        path.display()
    )))
}
