use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;
use typeahead_core::{Action, Candidate, InputEvent, Session, View};

use crate::config::InputConfig;
use crate::controller::QueryController;
use crate::source::{FetchOutcome, SuggestionClient};

#[derive(Debug)]
pub enum Message {
    Ui(InputEvent),
    SetChosen(Vec<Candidate>),
    DebounceElapsed(u64),
    QueryFinished { generation: u64, outcome: FetchOutcome },
    BlurElapsed,
    Dispose,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOutput {
    Render(View),
    /// The host's pick callback.
    Picked(Candidate),
    ReleaseFocus,
}

#[derive(Debug, Clone)]
pub struct WidgetOptions {
    pub debounce: Duration,
    pub blur_grace: Duration,
    pub chosen: Vec<Candidate>,
}

impl From<&InputConfig> for WidgetOptions {
    fn from(config: &InputConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            blur_grace: Duration::from_millis(config.blur_grace_ms),
            chosen: Vec::new(),
        }
    }
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self::from(&InputConfig::default())
    }
}

pub struct TypeaheadWidget {
    tx: UnboundedSender<Message>,
    task: Option<JoinHandle<()>>,
}

impl TypeaheadWidget {
    pub fn mount(
        client: SuggestionClient,
        options: WidgetOptions,
    ) -> (Self, UnboundedReceiver<WidgetOutput>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (outputs, output_rx) = mpsc::unbounded_channel();
        let actor = WidgetActor {
            session: Session::with_chosen(options.chosen),
            controller: QueryController::new(client, options.debounce, tx.clone()),
            blur_grace: options.blur_grace,
            tx: tx.clone(),
            outputs,
            last_view: None,
        };
        let task = tokio::spawn(actor.run(rx));
        (
            Self {
                tx,
                task: Some(task),
            },
            output_rx,
        )
    }

    pub fn send(&self, event: InputEvent) -> bool {
        self.tx.send(Message::Ui(event)).is_ok()
    }

    pub fn set_chosen(&self, chosen: Vec<Candidate>) -> bool {
        self.tx.send(Message::SetChosen(chosen)).is_ok()
    }

    pub async fn dispose(mut self) {
        let _ = self.tx.send(Message::Dispose);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for TypeaheadWidget {
    fn drop(&mut self) {
        let _ = self.tx.send(Message::Dispose);
    }
}

struct WidgetActor {
    session: Session,
    controller: QueryController,
    blur_grace: Duration,
    tx: UnboundedSender<Message>,
    outputs: UnboundedSender<WidgetOutput>,
    last_view: Option<View>,
}

impl WidgetActor {
    async fn run(mut self, mut rx: UnboundedReceiver<Message>) {
        self.render();
        while let Some(message) = rx.recv().await {
            if matches!(message, Message::Dispose) {
                break;
            }
            self.handle(message);
        }
        self.controller.dispose();
        debug!("typeahead widget disposed");
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Ui(event) => {
                let actions = self.session.handle(event);
                self.execute(actions);
            }
            Message::SetChosen(chosen) => self.session.set_chosen(chosen),
            Message::DebounceElapsed(generation) => {
                if !self.controller.take_debounce(generation) {
                    return;
                }
                self.start_query();
            }
            Message::QueryFinished {
                generation,
                outcome,
            } => match self.controller.settle(generation) {
                Ok(()) => {
                    if outcome.failed {
                        debug!(generation, "query failed, showing no candidates");
                    }
                    self.session.apply_results(outcome.items);
                }
                Err(error) => {
                    debug!(generation, "dropping query response: {error}");
                    return;
                }
            },
            Message::BlurElapsed => self.session.clear_suggestions(),
            Message::Dispose => return,
        }
        self.render();
    }

    fn start_query(&mut self) {
        let superseding = self.controller.is_in_flight();
        let prefix = self.session.begin_query();
        debug!(prefix = %prefix, superseding, "starting suggestion query");
        self.controller.start_query(prefix);
    }

    fn execute(&mut self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::ArmDebounce => self.controller.arm(),
                Action::CancelDebounce => self.controller.cancel_debounce(),
                Action::QueryNow => self.start_query(),
                Action::ScheduleBlurClear => {
                    let tx = self.tx.clone();
                    let grace = self.blur_grace;
                    tokio::spawn(async move {
                        sleep(grace).await;
                        let _ = tx.send(Message::BlurElapsed);
                    });
                }
                Action::Pick(candidate) => self.emit(WidgetOutput::Picked(candidate)),
                Action::ReleaseFocus => self.emit(WidgetOutput::ReleaseFocus),
                Action::NotifySelection(name) => self.controller.client().notify_selection(name),
            }
        }
    }

    fn render(&mut self) {
        let view = self.session.view();
        if self.last_view.as_ref() == Some(&view) {
            return;
        }
        self.last_view = Some(view.clone());
        self.emit(WidgetOutput::Render(view));
    }

    fn emit(&self, output: WidgetOutput) {
        let _ = self.outputs.send(output);
    }
}
