pub mod assets;
pub mod forms;
pub mod templates;

use crate::error::AppError;
use crate::store::Store;

/// Runs a store operation on the blocking thread pool so SQLite I/O never
/// stalls the async workers.
pub(crate) async fn with_store<F, T>(store: &Store, op: F) -> Result<T, AppError>
where
    F: FnOnce(&Store) -> rusqlite::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = store.clone();
    let result = tokio::task::spawn_blocking(move || op(&store)).await?;
    Ok(result?)
}
