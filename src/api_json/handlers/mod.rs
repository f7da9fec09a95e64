pub mod courses;
pub mod mandatory;
pub mod planner;
pub mod progress;
pub mod reviews;
pub mod schedules;
pub mod users;

pub use courses::*;
pub use mandatory::*;
pub use planner::*;
pub use progress::*;
pub use reviews::*;
pub use schedules::*;
pub use users::*;

use crate::error::AppError;

/// Runs blocking store work off the async executor.
pub(crate) async fn run_blocking<T, E, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("blocking task failed: {}", e)))?
        .map_err(Into::into)
}
