//! Page alerts.
//!
//! Success and info alerts dismiss themselves; warnings and errors stay until
//! the user closes them.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::config::config;
use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Error,
}

impl AlertKind {
    /// `None` means the alert persists until dismissed.
    pub fn auto_dismiss_ms(self) -> Option<u32> {
        let ui = &config().ui;
        match self {
            Self::Success => Some(ui.success_alert_ms),
            Self::Info => Some(ui.info_alert_ms),
            Self::Warning | Self::Error => None,
        }
    }

    fn intent(self) -> MessageBarIntent {
        match self {
            Self::Success => MessageBarIntent::Success,
            Self::Info => MessageBarIntent::Info,
            Self::Warning => MessageBarIntent::Warning,
            Self::Error => MessageBarIntent::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub id: u64,
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertQueue {
    alerts: Vec<Alert>,
    next_id: u64,
}

impl AlertQueue {
    pub fn push(&mut self, kind: AlertKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let message = message.into();
        // Repeating the same text replaces the older alert.
        self.alerts
            .retain(|a| !(a.kind == kind && a.message == message));
        self.alerts.push(Alert {
            id: self.next_id,
            kind,
            message,
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        before != self.alerts.len()
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }
}

#[derive(Clone, Copy)]
pub struct AlertService {
    queue: RwSignal<AlertQueue>,
}

impl AlertService {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(AlertQueue::default()),
        }
    }

    pub fn show(&self, kind: AlertKind, message: impl Into<String>) {
        let mut id = 0;
        self.queue.update(|q| id = q.push(kind, message));
        if let Some(ms) = kind.auto_dismiss_ms() {
            let this = *self;
            spawn_local(async move {
                TimeoutFuture::new(ms).await;
                this.dismiss(id);
            });
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(AlertKind::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(AlertKind::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.show(AlertKind::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(AlertKind::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.maybe_update(|q| q.dismiss(id));
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_alerts() -> AlertService {
    use_context::<AlertService>().expect("AlertService context not found")
}

/// Renders the active alerts in a fixed stack.
#[component]
pub fn AlertHost() -> impl IntoView {
    let alerts = use_alerts();

    view! {
        <div class="alert-host">
            <For
                each=move || alerts.queue.with(|q| q.alerts().to_vec())
                key=|alert| alert.id
                let:alert
            >
                <MessageBar intent=alert.kind.intent()>
                    <div class="alert-host__row">
                        <span class="alert-host__message">{alert.message.clone()}</span>
                        <Button
                            appearance=ButtonAppearance::Transparent
                            size=ButtonSize::Small
                            on_click=move |_| alerts.dismiss(alert.id)
                        >
                            {icon("x")}
                        </Button>
                    </div>
                </MessageBar>
            </For>
        </div>
    }
}
