//! Debounce timer and query supersession for one widget.
//!
//! Both slots follow the same rule: arming a new timer or starting a new
//! query aborts whatever occupied the slot and bumps its generation. Expiry
//! and completion messages carry the generation they were issued under and
//! are dropped when it no longer matches, which covers the case where an
//! aborted task had already queued its message.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::source::{FetchError, SuggestionClient};
use crate::widget::Message;

pub struct QueryController {
    client: SuggestionClient,
    debounce: Duration,
    tx: UnboundedSender<Message>,
    debounce_generation: u64,
    debounce_task: Option<JoinHandle<()>>,
    query_generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl QueryController {
    pub fn new(client: SuggestionClient, debounce: Duration, tx: UnboundedSender<Message>) -> Self {
        Self {
            client,
            debounce,
            tx,
            debounce_generation: 0,
            debounce_task: None,
            query_generation: 0,
            in_flight: None,
        }
    }

    pub fn client(&self) -> &SuggestionClient {
        &self.client
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn arm(&mut self) {
        self.cancel_debounce();
        let generation = self.debounce_generation;
        let delay = self.debounce;
        let tx = self.tx.clone();
        self.debounce_task = Some(tokio::spawn(async move {
            sleep(delay).await;
            let _ = tx.send(Message::DebounceElapsed(generation));
        }));
    }

    pub fn cancel_debounce(&mut self) {
        if let Some(task) = self.debounce_task.take() {
            task.abort();
        }
        self.debounce_generation = self.debounce_generation.wrapping_add(1);
    }

    /// Consumes a timer expiry. `false` means the timer was replaced or
    /// canceled after it fired and the expiry must be ignored.
    pub fn take_debounce(&mut self, generation: u64) -> bool {
        if generation != self.debounce_generation || self.debounce_task.is_none() {
            return false;
        }
        self.debounce_task = None;
        true
    }

    pub fn start_query(&mut self, prefix: String) -> u64 {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        self.query_generation = self.query_generation.wrapping_add(1);
        let generation = self.query_generation;
        let client = self.client.clone();
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = client.fetch_suggestions(&prefix).await;
            let _ = tx.send(Message::QueryFinished {
                generation,
                outcome,
            });
        }));
        generation
    }

    pub fn settle(&mut self, generation: u64) -> Result<(), FetchError> {
        if generation != self.query_generation || self.in_flight.is_none() {
            return Err(FetchError::Canceled);
        }
        self.in_flight = None;
        Ok(())
    }

    pub fn dispose(&mut self) {
        self.cancel_debounce();
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        self.dispose();
    }
}
