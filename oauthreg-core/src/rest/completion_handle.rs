/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! Single delivery of the eventual outcome of a write.

use oauthreg_dbp::api::ApiError;
use oauthreg_dbp::api::ApiErrorKind;
use std::pin::Pin;
use std::task::Context;
use std::task::Poll;
use tokio::sync::oneshot;

/** Handle to the eventual result of work running in the background.

Resolves exactly once. Dropping the handle does not abort the work: it runs to
completion and the outcome is discarded.
*/
#[must_use = "the outcome of the write is only observable through the handle"]
pub struct CompletionHandle<T> {
    receiver: oneshot::Receiver<Result<T, ApiError>>,
}

impl<T: Send + 'static> CompletionHandle<T> {
    /// Run `work` on the tokio runtime and return a handle to its result.
    pub fn spawn<F>(work: F) -> Self
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        tokio::spawn(async move {
            let result = work.await;
            if sender.send(result).is_err() {
                log::debug!("Completion handle was dropped before the outcome was delivered.");
            }
        });
        Self { receiver }
    }
}

impl<T> Unpin for CompletionHandle<T> {}

impl<T> Future for CompletionHandle<T> {
    type Output = Result<T, ApiError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().receiver)
            .poll(cx)
            .map(|received| {
                received.unwrap_or_else(|_| {
                    Err(ApiErrorKind::StorageFault
                        .error_with_msg("Background work ended without an outcome."))
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn delivers_result() {
        let handle = CompletionHandle::spawn(async { Ok::<_, ApiError>(42) });
        assert_eq!(handle.await.unwrap(), 42);
        let handle =
            CompletionHandle::<u8>::spawn(async { Err(ApiErrorKind::NotFound.error()) });
        assert_eq!(handle.await.unwrap_err().kind(), &ApiErrorKind::NotFound);
    }

    #[tokio::test]
    async fn work_completes_when_handle_is_dropped() {
        let done = Arc::new(AtomicBool::default());
        let done_clone = Arc::clone(&done);
        let handle = CompletionHandle::spawn(async move {
            tokio::task::yield_now().await;
            done_clone.store(true, Ordering::SeqCst);
            Ok(())
        });
        drop(handle);
        for _ in 0..1000 {
            if done.load(Ordering::SeqCst) {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;
        }
        assert!(done.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn panicking_work_is_a_storage_fault() {
        let handle = CompletionHandle::<()>::spawn(async { panic!("boom") });
        assert_eq!(handle.await.unwrap_err().kind(), &ApiErrorKind::StorageFault);
    }
}
