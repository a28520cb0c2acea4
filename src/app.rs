// Interactive dashboard shell: terminal lifecycle, input handling, and the
// wiring between the pollers and the rendered view.

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::models::{ContainerAction, ContainerSummary, SystemStatus};
use crate::poller::{
    ActionRequest, ActionWorkerDeps, ContainerListView, ContainerPollerDeps, StatusPollerDeps,
    spawn_action_worker, spawn_container_poller, spawn_status_poller,
};
use crate::ui;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};

/// Input-capturing overlay. While one is open it swallows all keys, which is
/// the terminal analog of a blocking alert/confirm dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Remove is irreversible; ask before sending anything.
    ConfirmRemove { container_id: String, name: String },
    Alert(String),
}

pub struct App {
    pub running: bool,
    pub status: Option<SystemStatus>,
    pub containers: ContainerListView,
    pub selected: usize,
    pub modal: Option<Modal>,
    /// Alerts waiting behind the open modal; each is shown in turn.
    pending_alerts: VecDeque<String>,
    action_tx: mpsc::Sender<ActionRequest>,
}

impl App {
    pub fn new(action_tx: mpsc::Sender<ActionRequest>) -> Self {
        Self {
            running: true,
            status: None,
            containers: ContainerListView::Loading,
            selected: 0,
            modal: None,
            pending_alerts: VecDeque::new(),
            action_tx,
        }
    }

    /// Shows the alert now, or queues it behind the open modal.
    pub fn push_alert(&mut self, message: String) {
        if self.modal.is_none() {
            self.modal = Some(Modal::Alert(message));
        } else {
            self.pending_alerts.push_back(message);
        }
    }

    fn close_modal(&mut self) {
        self.modal = self.pending_alerts.pop_front().map(Modal::Alert);
    }

    pub fn set_containers(&mut self, view: ContainerListView) {
        if let ContainerListView::Loaded(list) = &view {
            self.selected = self.selected.min(list.len().saturating_sub(1));
        } else {
            self.selected = 0;
        }
        self.containers = view;
    }

    pub fn selected_container(&self) -> Option<&ContainerSummary> {
        match &self.containers {
            ContainerListView::Loaded(list) => list.get(self.selected),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(modal) = self.modal.clone() {
            self.handle_modal_key(modal, key);
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let ContainerListView::Loaded(list) = &self.containers {
                    if self.selected + 1 < list.len() {
                        self.selected += 1;
                    }
                }
            }
            KeyCode::Char('s') => self.request_action(ContainerAction::Start),
            KeyCode::Char('x') => self.request_action(ContainerAction::Stop),
            KeyCode::Char('r') => self.request_action(ContainerAction::Restart),
            KeyCode::Char('d') => self.request_action(ContainerAction::Remove),
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, modal: Modal, key: KeyEvent) {
        match modal {
            // Any key dismisses an alert; the next queued one takes its place.
            Modal::Alert(_) => self.close_modal(),
            Modal::ConfirmRemove { container_id, .. } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.close_modal();
                    self.send_action(container_id, ContainerAction::Remove);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    // Declined: no request is sent.
                    self.close_modal();
                }
                _ => {}
            },
        }
    }

    fn request_action(&mut self, action: ContainerAction) {
        let Some(container) = self.selected_container() else {
            return;
        };
        let container_id = container.id.clone();
        let name = container.name.clone();
        if action.needs_confirmation() {
            self.modal = Some(Modal::ConfirmRemove { container_id, name });
            return;
        }
        self.send_action(container_id, action);
    }

    fn send_action(&mut self, container_id: String, action: ContainerAction) {
        let request = ActionRequest {
            container_id,
            action,
        };
        if self.action_tx.try_send(request).is_err() {
            tracing::warn!(
                operation = "dispatch_action",
                "action channel full or closed; action dropped"
            );
        }
    }
}

/// Runs the dashboard until the user quits. Pollers start only once the
/// terminal view is up, and are shut down and joined before returning.
pub async fn run(api: Arc<ApiClient>, config: &AppConfig) -> Result<()> {
    let (status_tx, status_rx) = watch::channel(None);
    let (containers_tx, containers_rx) = watch::channel(ContainerListView::Loading);
    let (refresh_tx, refresh_rx) = mpsc::channel(4);
    let (action_tx, action_rx) = mpsc::channel(16);
    let (alert_tx, alert_rx) = mpsc::channel(8);
    let (status_shutdown_tx, status_shutdown_rx) = oneshot::channel();
    let (containers_shutdown_tx, containers_shutdown_rx) = oneshot::channel();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let status_handle = spawn_status_poller(
        StatusPollerDeps {
            api: api.clone(),
            tx: status_tx,
            shutdown_rx: status_shutdown_rx,
        },
        config.polling.status_interval_secs,
    );
    let containers_handle = spawn_container_poller(
        ContainerPollerDeps {
            api: api.clone(),
            tx: containers_tx,
            refresh_rx,
            shutdown_rx: containers_shutdown_rx,
        },
        config.polling.containers_interval_secs,
    );
    let action_handle = spawn_action_worker(ActionWorkerDeps {
        api,
        request_rx: action_rx,
        refresh_tx,
        alert_tx,
    });

    let app = App::new(action_tx);
    let result = event_loop(&mut terminal, app, status_rx, containers_rx, alert_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let _ = status_shutdown_tx.send(());
    let _ = containers_shutdown_tx.send(());
    let _ = status_handle.await;
    let _ = containers_handle.await;
    // The app (and its action sender) is dropped by now, so the worker exits.
    let _ = action_handle.await;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    mut status_rx: watch::Receiver<Option<SystemStatus>>,
    mut containers_rx: watch::Receiver<ContainerListView>,
    mut alert_rx: mpsc::Receiver<String>,
) -> Result<()> {
    while app.running {
        if status_rx.has_changed().unwrap_or(false) {
            app.status = (*status_rx.borrow_and_update()).clone();
        }
        if containers_rx.has_changed().unwrap_or(false) {
            let view = (*containers_rx.borrow_and_update()).clone();
            app.set_containers(view);
        }
        while let Ok(message) = alert_rx.try_recv() {
            app.push_alert(message);
        }

        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn app_with_containers(containers: Vec<ContainerSummary>) -> (App, mpsc::Receiver<ActionRequest>) {
        let (tx, rx) = mpsc::channel(16);
        let mut app = App::new(tx);
        app.set_containers(ContainerListView::Loaded(containers));
        (app, rx)
    }

    fn one_container() -> Vec<ContainerSummary> {
        vec![ContainerSummary {
            id: "abc123".into(),
            name: "web".into(),
            image: "nginx:latest".into(),
            status: "running".into(),
        }]
    }

    #[test]
    fn remove_opens_confirm_without_sending() {
        let (mut app, mut rx) = app_with_containers(one_container());
        app.handle_key(key('d'));
        assert!(matches!(app.modal, Some(Modal::ConfirmRemove { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn declining_remove_sends_nothing() {
        let (mut app, mut rx) = app_with_containers(one_container());
        app.handle_key(key('d'));
        app.handle_key(key('n'));
        assert_eq!(app.modal, None);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn confirming_remove_sends_one_request() {
        let (mut app, mut rx) = app_with_containers(one_container());
        app.handle_key(key('d'));
        app.handle_key(key('y'));
        let request = rx.try_recv().expect("one action request");
        assert_eq!(request.container_id, "abc123");
        assert_eq!(request.action, ContainerAction::Remove);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn start_needs_no_confirmation() {
        let (mut app, mut rx) = app_with_containers(one_container());
        app.handle_key(key('s'));
        let request = rx.try_recv().expect("one action request");
        assert_eq!(request.action, ContainerAction::Start);
        assert_eq!(app.modal, None);
    }

    #[test]
    fn actions_without_containers_send_nothing() {
        let (mut app, mut rx) = app_with_containers(vec![]);
        app.handle_key(key('s'));
        app.handle_key(key('d'));
        assert!(rx.try_recv().is_err());
        assert_eq!(app.modal, None);
    }

    #[test]
    fn alert_is_dismissed_by_any_key() {
        let (mut app, _rx) = app_with_containers(one_container());
        app.modal = Some(Modal::Alert("Error: boom".into()));
        app.handle_key(key('s'));
        assert_eq!(app.modal, None);
        // The key was consumed by the modal, not treated as an action.
    }

    #[test]
    fn queued_alerts_are_shown_in_turn() {
        let (mut app, _rx) = app_with_containers(one_container());
        app.push_alert("Error: first".into());
        app.push_alert("Error: second".into());
        assert_eq!(app.modal, Some(Modal::Alert("Error: first".into())));
        app.handle_key(key(' '));
        assert_eq!(app.modal, Some(Modal::Alert("Error: second".into())));
        app.handle_key(key(' '));
        assert_eq!(app.modal, None);
    }

    #[test]
    fn alert_waits_behind_an_open_confirm() {
        let (mut app, mut rx) = app_with_containers(one_container());
        app.handle_key(key('d'));
        app.push_alert("Error: boom".into());
        assert!(matches!(app.modal, Some(Modal::ConfirmRemove { .. })));
        app.handle_key(key('n'));
        assert_eq!(app.modal, Some(Modal::Alert("Error: boom".into())));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn selection_clamps_to_list() {
        let (mut app, _rx) = app_with_containers(one_container());
        app.handle_key(key('j'));
        assert_eq!(app.selected, 0);
        app.selected = 5;
        app.set_containers(ContainerListView::Loaded(one_container()));
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn quit_key_stops_the_loop() {
        let (mut app, _rx) = app_with_containers(vec![]);
        app.handle_key(key('q'));
        assert!(!app.running);
    }
}
