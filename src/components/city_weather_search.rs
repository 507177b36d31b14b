use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tui_dispatch::{DataResource, EventKind};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::search_bar::INPUT_HEIGHT;
use super::title_header::HEADER_HEIGHT;
use super::{
    Component, ReportCards, ReportCardsProps, SearchBar, SearchBarProps, TitleHeader,
    TitleHeaderProps,
};
use crate::action::Action;
use crate::state::{AppState, CityReport};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";
pub const LOADING_TEXT: &str = "Loading…";
pub const TOO_SMALL_TEXT: &str = "Terminal too small";

/// Below this the layout cannot fit the search row and a status line.
const MIN_WIDTH: u16 = 30;
const MIN_HEIGHT: u16 = 14;
/// Shorter than this the FIGlet title and spacer would squeeze the 2×2 cards,
/// so the header collapses to one line.
const FULL_HEADER_MIN_HEIGHT: u16 = 28;

/// Props for CityWeatherSearch - read-only view of state
pub struct CityWeatherSearchProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: title, search box, status line, report, key hints
#[derive(Default)]
pub struct CityWeatherSearch {
    search: SearchBar,
}

impl CityWeatherSearch {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_props<'a>(props: &CityWeatherSearchProps<'a>) -> SearchBarProps<'a> {
        SearchBarProps {
            query: &props.state.query,
            suggestions: &props.state.suggestions,
            selected: props.state.suggestion_selected,
            is_focused: props.is_focused,
            on_query_change: Action::QueryChange,
            on_select: Action::SuggestSelect,
        }
    }
}

fn status_line(report: &DataResource<CityReport>) -> Option<Line<'static>> {
    match report {
        DataResource::Loading => Some(Line::from(Span::styled(
            LOADING_TEXT,
            Style::default().fg(Color::Gray),
        ))),
        DataResource::Failed(error) => Some(Line::from(vec![
            Span::raw(ERROR_ICON),
            Span::raw(" "),
            Span::styled(error.clone(), Style::default().fg(Color::Rgb(220, 20, 60)).bold()),
        ])),
        DataResource::Empty | DataResource::Loaded(_) => None,
    }
}

impl Component<Action> for CityWeatherSearch {
    type Props<'a> = CityWeatherSearchProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let search_props = Self::search_props(&props);
        self.search
            .handle_event(event, search_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: CityWeatherSearchProps<'_>) {
        if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
            let msg = Line::from(Span::styled(TOO_SMALL_TEXT, Style::default().fg(Color::DarkGray)));
            frame.render_widget(Paragraph::new(msg).wrap(Wrap { trim: true }), area);
            return;
        }

        let compact = area.height < FULL_HEADER_MIN_HEIGHT;
        let (header_height, spacer_height, status_height) = if compact {
            (1, 0, 1)
        } else {
            (HEADER_HEIGHT, 1, 2)
        };
        let [header, _, search_row, status, body, help] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Length(spacer_height),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(status_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let state = props.state;

        let mut title = TitleHeader;
        title.render(
            frame,
            header,
            TitleHeaderProps {
                is_animating: state.loading_anim_active(),
                tick_count: state.tick_count,
            },
        );

        if let Some(line) = status_line(&state.report) {
            frame.render_widget(Paragraph::new(line), status);
        }

        if let DataResource::Loaded(report) = &state.report {
            let mut cards = ReportCards;
            cards.render(frame, body, ReportCardsProps { report });
        }

        // Last, so the dropdown draws over the status line and cards
        let search_area = Rect {
            height: search_row.height + status.height + body.height,
            ..search_row
        };
        let search_props = Self::search_props(&props);
        self.search.render(frame, search_area, search_props);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            help,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "get info / pick"),
                    StatusBarHint::new("\u{2191}\u{2193}", "suggestions"),
                    StatusBarHint::new("esc", "close / quit"),
                    StatusBarHint::new("ctrl+c", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
