//! Runs translation requests off the UI thread.
//!
//! Each dispatched request gets its own short-lived thread. Responses come
//! back tagged with the request's token over a channel that the event loop
//! drains every tick.

use crate::domain::{TranslationRequest, TranslationResponse, TranslationResult, TranslationService};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

pub struct TranslationWorker {
    service: TranslationService,
    sender: Sender<TranslationResponse>,
    receiver: Receiver<TranslationResponse>,
}

impl TranslationWorker {
    pub fn new(service: TranslationService) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            service,
            sender,
            receiver,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.service.provider_name()
    }

    /// Starts `request` in the background. Returns immediately.
    pub fn dispatch(&self, request: TranslationRequest) {
        let service = self.service.clone();
        let sender = self.sender.clone();
        let token = request.token;
        tracing::info!(token = token.0, "Dispatching translation");

        let spawned = thread::Builder::new()
            .name(format!("translate-{}", token.0))
            .spawn(move || {
                let result = service.translate(&request.roman_text);
                if sender.send(TranslationResponse { token, result }).is_err() {
                    tracing::debug!(token = token.0, "Receiver gone, dropping translation");
                }
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to spawn translation thread: {}", e);
            let result = TranslationResult::failed(format!(
                "Failed to translate text: {}. Please try again.",
                e
            ));
            let _ = self.sender.send(TranslationResponse { token, result });
        }
    }

    /// Returns a finished response without blocking.
    pub fn try_recv(&self) -> Option<TranslationResponse> {
        self.receiver.try_recv().ok()
    }

    /// Waits up to `timeout` for a finished response.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<TranslationResponse> {
        match self.receiver.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::testing::ScriptedInvoker;
    use crate::domain::RequestToken;
    use std::sync::Arc;

    #[test]
    fn test_dispatch_round_trip() {
        let invoker = Arc::new(ScriptedInvoker::replying("ਹੋ ਜਦ ਵੀ ਬੋਲੇ"));
        let worker = TranslationWorker::new(TranslationService::new(invoker.clone()));

        worker.dispatch(TranslationRequest {
            token: RequestToken(7),
            roman_text: "Ho jadd vi bole".to_string(),
        });

        let response = worker.recv_timeout(Duration::from_secs(5)).expect("response");
        assert_eq!(response.token, RequestToken(7));
        assert_eq!(response.result, TranslationResult::translated("ਹੋ ਜਦ ਵੀ ਬੋਲੇ"));
        assert_eq!(invoker.call_count(), 1);
    }

    #[test]
    fn test_try_recv_empty() {
        let invoker = Arc::new(ScriptedInvoker::replying("unused"));
        let worker = TranslationWorker::new(TranslationService::new(invoker));
        assert!(worker.try_recv().is_none());
    }
}
