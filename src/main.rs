use clap::Parser;

use twochoice::api::HttpGateway;
use twochoice::cli::Cli;
use twochoice::config::Config;
use twochoice::controller::Controller;
use twochoice::state::{Dialog, Page};
use twochoice::view::{self, ListEntry};
use twochoice::{logging, tui, worker};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let start_page: Page = cli.page.parse()?;

    let config = Config::load(&cli)?;
    logging::init(&config.log_file)?;
    tracing::info!(api_base = %config.api_base, "starting twochoice");

    let gateway = HttpGateway::new(&config.api_base, config.timeout)
        .map_err(|e| format!("Cannot create HTTP client: {}", e))?;
    let mut controller = Controller::new(config.settings.clone());

    // Handle --history / --questions
    if cli.history || cli.questions {
        let page = if cli.history {
            Page::History
        } else {
            Page::EditList
        };
        controller.show_page(page);
        controller.run_pending(&gateway);
        return print_list(&controller);
    }

    controller.show_page(start_page);
    let worker = worker::spawn_worker(gateway);
    tui::run_tui(controller, worker)
}

fn print_list(controller: &Controller) -> Result<(), String> {
    if let Some(Dialog::Notice(notice)) = controller.state().top_dialog() {
        return Err(match &notice.detail {
            Some(detail) => format!("{} ({})", notice.message, detail),
            None => notice.message.clone(),
        });
    }

    let entries = match view::build(controller.state(), controller.settings().bar_max_width) {
        view::PageView::History(entries) | view::PageView::EditList(entries) => entries,
        _ => Vec::new(),
    };
    for entry in entries {
        match entry {
            ListEntry::Placeholder(text) => println!("{}", text),
            ListEntry::Text(text) => println!("{}", text),
            ListEntry::Editable {
                id,
                title,
                subtitle,
                ..
            } => println!("[{}] {}  ({})", id, title, subtitle),
        }
    }
    Ok(())
}
