//! Translation of service outcomes into store results.
//!
//! Every service call goes through [`guarded`], which races it against the
//! caller's cancellation token. The remaining helpers apply the per-category
//! failure policy: mutations surface errors, lookups collapse faults to
//! "nothing found".

use ferrid_service::{ServiceError, ServiceResult};
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::error::{Entity, IdentityError, IdentityResult};

/// Run a service call unless the token is, or becomes, cancelled.
pub(crate) async fn guarded<T, F>(cancel: &CancellationToken, call: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    if cancel.is_cancelled() {
        return Err(ServiceError::Cancelled);
    }

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ServiceError::Cancelled),
        result = call => result,
    }
}

/// Outcome of a create, update or delete.
pub(crate) fn complete(
    entity: Entity,
    operation: &str,
    id: &str,
    outcome: Result<ServiceResult, ServiceError>,
) -> IdentityResult {
    match outcome {
        Ok(ServiceResult::Success) => Ok(()),
        Ok(ServiceResult::Failure) => {
            tracing::warn!(%entity, operation, id, "Service reported failure");
            Err(IdentityError::failed(entity))
        }
        Err(e) => {
            tracing::error!(%entity, operation, id, error = %e, "Service fault");
            Err(IdentityError::from_service(entity, &e))
        }
    }
}

/// Outcome of a single-record lookup. Faults read as "not found".
pub(crate) fn found<T>(
    operation: &str,
    key: &str,
    outcome: Result<Option<T>, ServiceError>,
) -> Option<T> {
    match outcome {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(operation, key, error = %e, "Lookup failed");
            None
        }
    }
}

/// Outcome of a listing. Faults read as an empty list.
pub(crate) fn listed<T>(
    operation: &str,
    key: &str,
    outcome: Result<Vec<T>, ServiceError>,
) -> Vec<T> {
    match outcome {
        Ok(items) => {
            if items.is_empty() {
                tracing::warn!(operation, key, "Nothing found");
            }
            items
        }
        Err(e) => {
            tracing::error!(operation, key, error = %e, "Listing failed");
            Vec::new()
        }
    }
}
