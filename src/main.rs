//! DailyWeather - city search TUI

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dailyweather::action::Action;
use dailyweather::api::{BackendClient, DEFAULT_BACKEND_URL};
use dailyweather::components::{CityWeatherSearch, CityWeatherSearchProps, Component};
use dailyweather::effect::Effect;
use dailyweather::logging;
use dailyweather::reducer::reducer;
use dailyweather::state::{AppState, LOADING_ANIM_TICK_MS};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Weather, air quality, UV index & traffic for any city
#[derive(Parser, Debug)]
#[command(name = "dailyweather")]
#[command(about = "Search a city and see its weather, air quality, UV index and traffic")]
struct Args {
    /// Backend origin serving /cities and /city-info
    #[arg(long, default_value = DEFAULT_BACKEND_URL)]
    base_url: String,

    /// Pre-fill the search box and fetch this city on startup
    #[arg(long, short)]
    city: Option<String>,

    /// Wait this long after the last keystroke before asking for suggestions (0 = every keystroke)
    #[arg(long, default_value = "0")]
    suggest_debounce_ms: u64,

    /// Write logs to this file (RUST_LOG sets the filter)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(Clone, Debug)]
struct RuntimeConfig {
    client: BackendClient,
    suggest_debounce: Duration,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum AppComponentId {
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum AppContext {
    Main,
}

impl EventRoutingState<AppComponentId, AppContext> for AppState {
    fn focused(&self) -> Option<AppComponentId> {
        Some(AppComponentId::Search)
    }

    fn modal(&self) -> Option<AppComponentId> {
        None
    }

    fn binding_context(&self, _id: AppComponentId) -> AppContext {
        AppContext::Main
    }

    fn default_context(&self) -> AppContext {
        AppContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        base_url,
        city,
        suggest_debounce_ms,
        log_file,
        debug: debug_args,
    } = Args::parse();

    logging::init(log_file.as_deref())?;

    let client = BackendClient::new(base_url);
    tracing::info!(
        base_url = client.base_url(),
        suggest_debounce_ms,
        "starting dailyweather"
    );

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let init_action = city.as_ref().map(|_| Action::ReportFetch);
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::with_query(city.unwrap_or_default()))
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let config = RuntimeConfig {
        client,
        suggest_debounce: Duration::from_millis(suggest_debounce_ms),
    };
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        init_action,
        replay_actions,
        config,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct AppUi {
    view: CityWeatherSearch,
}

impl AppUi {
    fn new() -> Self {
        Self {
            view: CityWeatherSearch::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<AppComponentId>,
    ) {
        event_ctx.set_component_area(AppComponentId::Search, area);

        let props = CityWeatherSearchProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.view.render(frame, area, props);
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = CityWeatherSearchProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.view.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    init_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
    config: RuntimeConfig,
) -> io::Result<DebugRunOutput<AppState>> {
    let config = Arc::new(config);
    let ui = Rc::new(RefCell::new(AppUi::new()));
    let mut bus: EventBus<AppState, Action, AppComponentId, AppContext> = EventBus::new();
    let keybindings: Keybindings<AppContext> = Keybindings::new();

    let ui_search = Rc::clone(&ui);
    bus.register(AppComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            init_action,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_ANIM_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &config),
        )
        .await
}

/// Handle effects by spawning keyed tasks. Completions carry the request's
/// sequence tag; the reducer drops any that are no longer current.
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, config: &RuntimeConfig) {
    let key = effect.task_key();
    let debounce =
        matches!(effect, Effect::SearchCities { .. }) && !config.suggest_debounce.is_zero();
    let client = config.client.clone();
    let task = async move { effect.run(&client).await };

    if debounce {
        ctx.tasks().debounce(key, config.suggest_debounce, task);
    } else {
        ctx.tasks().spawn(TaskKey::new(key), task);
    }
}
