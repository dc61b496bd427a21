use color_eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Layout, Rect},
    widgets::Block,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    action::Action,
    components::{Component, form::FormView, header::Header, status_bar::StatusBar},
    config::Config,
    form::FormStore,
    theme::{Theme, UiGroup},
    tui::{Event, EventResponse, Tui},
};

pub struct App {
    config: Config,
    theme: Theme,
    /// Top to bottom, in layout order.
    components: Vec<Box<dyn Component>>,
    should_quit: bool,
    should_suspend: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(config: Config, theme: Theme) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let components: Vec<Box<dyn Component>> = vec![
            Box::new(Header::default()),
            Box::new(FormView::new(FormStore::default())),
            Box::new(StatusBar::new()),
        ];
        Ok(Self {
            config,
            theme,
            components,
            should_quit: false,
            should_suspend: false,
            action_tx,
            action_rx,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(self.config.tick_rate)
            .frame_rate(self.config.frame_rate)
            .paste(true);
        tui.enter()?;

        for component in self.components.iter_mut() {
            component.register_action_handler(self.action_tx.clone())?;
        }
        info!(
            tick_rate = self.config.tick_rate,
            frame_rate = self.config.frame_rate,
            color_mode = self.theme.mode_label(),
            "ui started"
        );

        let action_tx = self.action_tx.clone();
        loop {
            self.handle_events(&mut tui).await?;
            self.handle_actions(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                action_tx.send(Action::ClearScreen)?;
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        info!("ui stopped");
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };
        let action_tx = self.action_tx.clone();
        if let Some(action) = loop_action(&event) {
            action_tx.send(action)?;
        }
        match &event {
            Event::Error(_) => return Ok(()),
            Event::Key(key) => {
                if let Some(action) = global_key(*key) {
                    action_tx.send(action)?;
                    return Ok(());
                }
            }
            _ => {}
        }
        for component in self.components.iter_mut() {
            match component.handle_events(event.clone())? {
                Some(EventResponse::Stop(action)) => {
                    action_tx.send(action)?;
                    break;
                }
                Some(EventResponse::Continue(action)) => action_tx.send(action)?,
                None => {}
            }
        }
        Ok(())
    }

    fn handle_actions(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            if action != Action::Tick && action != Action::Render {
                debug!("{action:?}");
            }
            match &action {
                Action::Quit => self.should_quit = true,
                Action::Suspend => self.should_suspend = true,
                Action::Resume => self.should_suspend = false,
                Action::ClearScreen => tui.terminal.clear()?,
                Action::Resize(w, h) => self.handle_resize(tui, *w, *h)?,
                Action::Render => self.render(tui)?,
                Action::Error(msg) => tracing::error!("{msg}"),
                _ => {}
            }
            for component in self.components.iter_mut() {
                if let Some(action) = component.update(action.clone())? {
                    self.action_tx.send(action)?
                };
            }
        }
        Ok(())
    }

    fn handle_resize(&mut self, tui: &mut Tui, w: u16, h: u16) -> Result<()> {
        tui.resize(Rect::new(0, 0, w, h))?;
        self.render(tui)?;
        Ok(())
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        let action_tx = self.action_tx.clone();
        let theme = &self.theme;
        let components = &mut self.components;
        tui.draw(|frame| {
            let area = frame.area();
            frame.render_widget(Block::default().style(theme.style(UiGroup::Canvas)), area);
            let rows = Layout::vertical(components.iter().map(|c| c.height_constraint()))
                .split(area);
            for (component, row) in components.iter_mut().zip(rows.iter()) {
                if let Err(err) = component.draw(frame, *row, theme) {
                    let _ = action_tx.send(Action::Error(format!(
                        "Failed to draw {}: {:?}",
                        component.name(),
                        err
                    )));
                }
            }
        })?;
        Ok(())
    }
}

/// Action the loop itself derives from a terminal event.
fn loop_action(event: &Event) -> Option<Action> {
    match event {
        Event::Error(err) => Some(Action::Error(format!("terminal input failed: {err}"))),
        Event::Tick => Some(Action::Tick),
        Event::Render => Some(Action::Render),
        Event::Resize(x, y) => Some(Action::Resize(*x, *y)),
        Event::Key(_) | Event::Paste(_) => None,
    }
}

/// Keys the application handles before any component sees them. Plain `q`
/// is left to the components, which know whether it is text input.
fn global_key(key: KeyEvent) -> Option<Action> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') => Some(Action::Quit),
        KeyCode::Char('z') => Some(Action::Suspend),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_become_error_actions() {
        assert_eq!(
            loop_action(&Event::Error("device not configured".into())),
            Some(Action::Error(
                "terminal input failed: device not configured".into()
            ))
        );
        assert_eq!(loop_action(&Event::Resize(80, 24)), Some(Action::Resize(80, 24)));
        assert_eq!(loop_action(&Event::Paste("1".into())), None);
    }

    #[test]
    fn only_control_chords_are_global() {
        let ctrl = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        assert_eq!(global_key(ctrl('c')), Some(Action::Quit));
        assert_eq!(global_key(ctrl('z')), Some(Action::Suspend));
        assert_eq!(
            global_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            None
        );
    }
}
