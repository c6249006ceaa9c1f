mod common;

use std::time::{Duration, Instant};

use ratatui::backend::TestBackend;
use ratatui::Terminal;

use common::{controller, FakeApi};
use twochoice::controller::Controller;
use twochoice::model::Choice;
use twochoice::state::Page;

fn render(controller: &Controller) -> Vec<String> {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|f| twochoice::ui::draw(f, controller))
        .unwrap();
    let buffer = terminal.backend().buffer();
    buffer.content.iter().map(|cell| cell.symbol().to_string()).collect()
}

fn count(cells: &[String], symbol: &str) -> usize {
    cells.iter().filter(|s| s.as_str() == symbol).count()
}

#[test]
fn test_result_bars_draw_after_reveal() {
    let api = FakeApi::new();
    let mut c = controller();
    c.show_page(Page::Question);
    c.run_pending(&api);
    c.vote(Choice::A).unwrap();
    c.run_pending(&api);

    let t0 = Instant::now();
    c.open_result(t0);
    assert_eq!(count(&render(&c), "█"), 0);

    c.tick(t0 + Duration::from_millis(100));
    let cells = render(&c);
    // 60 columns stand for the full 300px: 45 for Cats, 15 for Dogs
    assert_eq!(count(&cells, "█"), 60);
    assert_eq!(count(&cells, "░"), 60);
}

#[test]
fn test_every_page_renders_its_own_content() {
    let api = FakeApi::new();
    let mut c = controller();
    for page in Page::ALL {
        c.show_page(page);
        c.run_pending(&api);
        while c.state().has_dialog() {
            c.state_mut().pop_dialog();
        }
        let text = render(&c).concat();
        assert!(text.contains(page.id()), "{} missing from status bar", page);

        let expected = match page {
            Page::Question => Some("Q. Tea or coffee?"),
            Page::History => Some("Cats or dogs?"),
            Page::EditList => Some("A: Cats / B: Dogs"),
            _ => None,
        };
        if let Some(expected) = expected {
            assert!(text.contains(expected), "{} should show {:?}", page, expected);
        }
    }
}

#[test]
fn test_confirm_dialog_overlays_edit_list() {
    let api = FakeApi::new();
    let mut c = controller();
    c.show_page(Page::EditList);
    c.run_pending(&api);
    c.request_delete(twochoice::model::QuestionId::Number(1));

    let text: String = render(&c).concat();
    assert!(text.contains("[y]"));
    assert!(text.contains("Delete"));
}
