use std::io;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use crate::controller::Controller;
use crate::error::FlowError;
use crate::model::Choice;
use crate::state::{Dialog, Notice, Page};
use crate::view::TOP_MENU;
use crate::worker::Worker;

pub fn run_tui(mut controller: Controller, worker: Worker) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let result = main_loop(&mut terminal, &mut controller, &worker);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut Controller,
    worker: &Worker,
) -> Result<(), String> {
    loop {
        for pending in controller.take_pending() {
            worker.submit(pending)?;
        }

        terminal
            .draw(|f| crate::ui::draw(f, controller))
            .map_err(|e| format!("Draw error: {}", e))?;

        if controller.state().should_quit {
            info!("quit");
            break;
        }

        if event::poll(Duration::from_millis(50)).map_err(|e| format!("Poll error: {}", e))? {
            if let Event::Key(key) = event::read().map_err(|e| format!("Read error: {}", e))? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, controller);
                }
            }
        }

        // Continuations run here, on the UI thread.
        while let Some(done) = worker.try_recv() {
            controller.complete(done);
        }

        controller.tick(Instant::now());
    }

    Ok(())
}

pub fn handle_key(key: KeyEvent, controller: &mut Controller) {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        controller.state_mut().should_quit = true;
        return;
    }

    if controller.state().has_dialog() {
        handle_dialog_key(key, controller);
        return;
    }

    let outcome = match controller.state().page {
        Page::Top => {
            handle_top_key(key, controller);
            Ok(())
        }
        Page::Question => handle_question_key(key, controller),
        Page::Result => {
            handle_result_key(key, controller);
            Ok(())
        }
        Page::History => {
            if is_back(key) {
                controller.show_page(Page::Top);
            }
            Ok(())
        }
        Page::EditList => {
            handle_edit_list_key(key, controller);
            Ok(())
        }
        Page::Create => handle_form_key(key, controller, Page::Top),
        Page::EditDetail => handle_form_key(key, controller, Page::EditList),
    };

    if let Err(e) = outcome {
        report(controller, e);
    }
}

fn report(controller: &mut Controller, err: FlowError) {
    info!(error = %err, "flow rejected");
    controller
        .state_mut()
        .push_dialog(Dialog::Notice(Notice::error(err.to_string(), None)));
}

fn is_back(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('t'))
}

fn handle_dialog_key(key: KeyEvent, controller: &mut Controller) {
    let dialog = controller.state().top_dialog().cloned();
    match dialog {
        Some(Dialog::ConfirmDelete(_)) => match key.code {
            KeyCode::Enter | KeyCode::Char('y') => controller.resolve_delete(true),
            KeyCode::Esc | KeyCode::Char('n') => controller.resolve_delete(false),
            _ => {}
        },
        Some(Dialog::Notice(_)) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                controller.state_mut().pop_dialog();
            }
        }
        Some(Dialog::Help) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                controller.state_mut().pop_dialog();
            }
        }
        None => {}
    }
}

fn handle_top_key(key: KeyEvent, controller: &mut Controller) {
    let state = controller.state_mut();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.top_cursor = state.top_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.top_cursor = (state.top_cursor + 1).min(TOP_MENU.len() - 1);
        }
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            state.top_cursor = idx;
            controller.show_page(TOP_MENU[idx].1);
        }
        KeyCode::Enter => {
            let page = TOP_MENU[state.top_cursor].1;
            controller.show_page(page);
        }
        KeyCode::Char('?') => state.push_dialog(Dialog::Help),
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        _ => {}
    }
}

fn handle_question_key(key: KeyEvent, controller: &mut Controller) -> Result<(), FlowError> {
    match key.code {
        KeyCode::Char('a') | KeyCode::Left => controller.vote(Choice::A),
        KeyCode::Char('b') | KeyCode::Right => controller.vote(Choice::B),
        KeyCode::Char('r') => {
            controller.load_question();
            Ok(())
        }
        _ if is_back(key) => {
            controller.show_page(Page::Top);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn handle_result_key(key: KeyEvent, controller: &mut Controller) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('o') => {
            controller.open_result(Instant::now());
        }
        _ if is_back(key) => controller.show_page(Page::Top),
        _ => {}
    }
}

fn handle_edit_list_key(key: KeyEvent, controller: &mut Controller) {
    let len = controller
        .state()
        .edit_list
        .as_ref()
        .map_or(0, |list| list.len());
    let selected = controller.state().selected_question().map(|q| q.id.clone());

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            let state = controller.state_mut();
            state.edit_cursor = state.edit_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let state = controller.state_mut();
            state.edit_cursor = (state.edit_cursor + 1).min(len.saturating_sub(1));
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(id) = selected {
                controller.begin_edit(id);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = selected {
                controller.request_delete(id);
            }
        }
        KeyCode::Char('r') => controller.load_edit_list(),
        _ if is_back(key) => controller.show_page(Page::Top),
        _ => {}
    }
}

/// Text entry for the create and edit-detail pages.
fn handle_form_key(
    key: KeyEvent,
    controller: &mut Controller,
    back: Page,
) -> Result<(), FlowError> {
    let creating = controller.state().page == Page::Create;
    let submit = |controller: &mut Controller| {
        if creating {
            controller.create_question()
        } else {
            controller.save_edit()
        }
    };

    if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return submit(controller);
    }

    let state = controller.state_mut();
    let form = if creating {
        &mut state.create_form
    } else {
        &mut state.edit_form
    };

    match key.code {
        KeyCode::Esc => controller.show_page(back),
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
        KeyCode::Enter => {
            if form.focus == crate::state::FormField::OptionB {
                return submit(controller);
            }
            form.focus = form.focus.next();
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.insert_char(c)
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Settings;
    use crate::flow::Request;

    fn press(controller: &mut Controller, code: KeyCode) {
        handle_key(KeyEvent::new(code, KeyModifiers::NONE), controller);
    }

    #[test]
    fn top_menu_enter_routes_to_selected_page() {
        let mut c = Controller::new(Settings::default());
        press(&mut c, KeyCode::Down);
        press(&mut c, KeyCode::Down);
        press(&mut c, KeyCode::Enter);
        assert_eq!(c.state().page, Page::History);
        assert_eq!(c.take_pending()[0].request, Request::History);
    }

    #[test]
    fn typing_fills_create_form_and_enter_submits() {
        let mut c = Controller::new(Settings::default());
        c.show_page(Page::Create);
        for ch in "Q?".chars() {
            press(&mut c, KeyCode::Char(ch));
        }
        press(&mut c, KeyCode::Enter);
        press(&mut c, KeyCode::Char('x'));
        press(&mut c, KeyCode::Tab);
        press(&mut c, KeyCode::Char('y'));
        press(&mut c, KeyCode::Enter);

        let pending = c.take_pending();
        assert_eq!(pending.len(), 1);
        assert!(matches!(pending[0].request, Request::CreateQuestion(ref d) if d.q == "Q?"));
    }

    #[test]
    fn vote_without_question_shows_notice() {
        let mut c = Controller::new(Settings::default());
        c.state_mut().page = Page::Question;
        press(&mut c, KeyCode::Char('a'));
        assert!(!c.has_pending());
        assert_eq!(
            c.state().notices().next().map(|n| n.message.as_str()),
            Some("お題が読み込まれていません")
        );
        press(&mut c, KeyCode::Enter);
        assert!(!c.state().has_dialog());
    }
}
