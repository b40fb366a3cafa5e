mod commands;
mod console;
mod logging;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, bail, Context};
use log::LevelFilter;
use results_core::{url_codec, FilterSelection, PaginationData, ViewState};
use results_engine::{
    controller_channel, ContentUpdateController, ControllerHandle, FixtureSet, ReqwestFetcher,
    ResultsConfig,
};
use results_logging::results_info;
use url::Url;

use commands::{Command, HELP};
use console::{ConsoleHistory, ConsoleView};

const USAGE: &str = "usage: results_app <page-url> <base-segment> [fixtures.json]";

#[derive(Debug)]
struct Args {
    origin: Url,
    base_path: String,
    fixtures: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let (Some(page), Some(base_segment)) = (args.next(), args.next()) else {
            bail!(USAGE);
        };
        let fixtures = args.next().map(PathBuf::from);
        if args.next().is_some() {
            bail!(USAGE);
        }
        let page = Url::parse(&page).with_context(|| format!("invalid page url {page:?}"))?;
        let (origin, base_path) = listing_root(&page, &base_segment)?;
        Ok(Self {
            origin,
            base_path,
            fixtures,
        })
    }
}

/// Splits a page URL into its origin and the listing base path ending at `base_segment`.
fn listing_root(page: &Url, base_segment: &str) -> anyhow::Result<(Url, String)> {
    let base_path = url_codec::relative_base_url(page.path(), base_segment)
        .ok_or_else(|| anyhow!("{} is not under {base_segment:?}", page.path()))?
        .to_string();
    let mut origin = page.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    Ok((origin, base_path))
}

fn build_config(args: Args) -> anyhow::Result<ResultsConfig> {
    let mut config = ResultsConfig::new(args.origin, args.base_path);
    if let Ok(endpoint) = std::env::var("RESULTS_ENDPOINT") {
        config.endpoint_override = Some(
            Url::parse(&endpoint).with_context(|| format!("invalid RESULTS_ENDPOINT {endpoint:?}"))?,
        );
    }
    if let Some(path) = args.fixtures {
        let fixtures = FixtureSet::from_path(&path)
            .with_context(|| format!("loading fixtures from {}", path.display()))?;
        config = config.with_fixtures(fixtures);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse(std::env::args().skip(1))?;
    logging::initialize(logging::LogDestination::from_env(), LevelFilter::Info);
    let config = build_config(args)?;
    results_info!(
        "starting on {}{} (fixtures: {})",
        config.host(),
        config.base_path,
        config.fixture_source().is_some()
    );

    let initial = ViewState::initial(FilterSelection::new(), PaginationData::default());
    let (handle, inbox) = controller_channel();
    let history = Arc::new(ConsoleHistory::default());
    let view = Arc::new(ConsoleView::new(
        handle.pagination_events().downgrade(),
        &initial.pagination.data,
    ));
    let collaborators = console::collaborators(history.clone(), view.clone());
    let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));

    let controller_thread = thread::spawn(move || -> anyhow::Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("building runtime")?;
        runtime.block_on(async move {
            ContentUpdateController::new(config, collaborators, fetcher, initial, inbox)
                .run()
                .await;
        });
        Ok(())
    });

    // First listing load for the initial state.
    handle.history_events().emit(None)?;
    println!("{HELP}");

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        match commands::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => execute(&handle, &history, &view, command)?,
            Err(err) => eprintln!("{err:#}"),
        }
    }

    // The controller may already be gone if its thread failed.
    let _ = handle.shutdown();
    controller_thread
        .join()
        .map_err(|_| anyhow!("controller thread panicked"))?
}

fn execute(
    handle: &ControllerHandle,
    history: &ConsoleHistory,
    pagination: &ConsoleView,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Filter(pairs) => {
            let current = handle.view().view_state.filter.data;
            handle
                .filter_events()
                .emit(commands::apply_filters(&current, &pairs))?
        }
        Command::Page(page_move) => pagination.move_page(&page_move)?,
        Command::Back => match history.go_back() {
            Some(state) => handle.history_events().emit(Some(state))?,
            None => println!("no earlier entry"),
        },
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}
