use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Padding, ScrollbarStyle, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle, TextInput, TextInputProps, TextInputStyle,
    highlight_substring,
};

use super::Component;
use crate::action::Action;
use crate::state::Suggestion;

pub const PLACEHOLDER: &str = "Search city (e.g. Delhi)";
pub const BUTTON_LABEL: &str = "Get Info";

/// Input row height
pub const INPUT_HEIGHT: u16 = 3;
/// Most dropdown rows shown at once (the list scrolls past this)
const DROPDOWN_MAX_ROWS: u16 = 8;

/// Search box with the autocomplete dropdown underneath.
///
/// Rendered into the input row *plus* the space below it, so the dropdown can
/// float over whatever was drawn there first.
pub struct SearchBar {
    input: TextInput,
    list: SelectList,
    /// Query as of the input's last edit. Anything else means the query was
    /// replaced from outside (a picked suggestion) and the cursor is stale.
    synced_query: String,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub suggestions: &'a [Suggestion],
    pub selected: usize,
    pub is_focused: bool,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_select: fn(usize) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
            list: SelectList::new(),
            synced_query: String::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the input to the end of `query` if it was replaced from outside.
    fn sync_input(&mut self, query: &str, on_query_change: fn(String) -> Action) {
        if self.synced_query == query {
            return;
        }
        self.input = TextInput::new();
        let end = EventKind::Key(KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        let props = TextInputProps {
            value: query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle::default(),
            on_change: on_query_change,
            on_submit: |_| Action::ReportFetch,
            on_cursor_move: None,
        };
        // Only moves the cursor, emits nothing
        let _ = self.input.handle_event(&end, props);
        self.synced_query = query.to_string();
    }

    fn suggestion_items(suggestions: &[Suggestion], query: &str) -> Vec<Line<'static>> {
        let base = Style::default().fg(Color::Reset);
        let highlight = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        suggestions
            .iter()
            .map(|s| highlight_substring(&s.label(), query, base, highlight))
            .collect()
    }

    fn list_style() -> SelectListStyle {
        SelectListStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::xy(1, 0),
                bg: None,
                fg: None,
            },
            selection: SelectionStyle::default(),
            scrollbar: ScrollbarStyle::default(),
        }
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        let dropdown_open = !props.suggestions.is_empty();

        // Handle special keys first
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![Action::Quit];
            }
            KeyCode::Esc => {
                return vec![if dropdown_open {
                    Action::SuggestDismiss
                } else {
                    Action::Quit
                }];
            }
            // Enter picks from an open dropdown, otherwise it is "Get Info"
            KeyCode::Enter => {
                return vec![if dropdown_open {
                    Action::SuggestPick
                } else {
                    Action::ReportFetch
                }];
            }
            KeyCode::Down | KeyCode::Up => {
                if !dropdown_open {
                    return Vec::new();
                }
                let items = Self::suggestion_items(props.suggestions, props.query);
                let list_props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: props.selected,
                    is_focused: true,
                    style: Self::list_style(),
                    behavior: SelectListBehavior::default(),
                    on_select: props.on_select,
                    render_item: &|item| item.clone(),
                };
                return self
                    .list
                    .handle_event(event, list_props)
                    .into_iter()
                    .collect();
            }
            _ => {}
        }

        // All other keys edit the query
        self.sync_input(props.query, props.on_query_change);
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::new(1, 0, 1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_query_change,
            on_submit: |_| Action::ReportFetch,
            on_cursor_move: Some(|_| Action::Render),
        };
        let actions: Vec<_> = self
            .input
            .handle_event(event, input_props)
            .into_iter()
            .collect();
        if let Some(Action::QueryChange(value)) = actions.first() {
            self.synced_query = value.clone();
        }
        actions
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [input_row, below] =
            Layout::vertical([Constraint::Length(INPUT_HEIGHT), Constraint::Min(0)]).areas(area);
        let [input_area, _, button_area] = Layout::horizontal([
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(BUTTON_LABEL.len() as u16 + 4),
        ])
        .areas(input_row);

        self.sync_input(props.query, props.on_query_change);
        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::all(1),
                    bg: Some(Color::Rgb(50, 50, 60)),
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_query_change,
            on_submit: |_| Action::ReportFetch,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, input_area, input_props);

        let button = Paragraph::new(vec![
            Line::default(),
            Line::from(BUTTON_LABEL).centered(),
        ])
        .style(
            Style::default()
                .bg(Color::Rgb(37, 99, 235))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(button, button_area);

        if props.suggestions.is_empty() || below.height < 3 {
            return;
        }

        // Border rows + entries, capped
        let rows = (props.suggestions.len() as u16).min(DROPDOWN_MAX_ROWS) + 2;
        let dropdown_area = Rect {
            x: input_area.x,
            y: below.y,
            width: input_area.width,
            height: rows.min(below.height),
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(Color::Rgb(35, 35, 45)));
        let list_area = block.inner(dropdown_area);
        frame.render_widget(Clear, dropdown_area);
        frame.render_widget(block, dropdown_area);

        let items = Self::suggestion_items(props.suggestions, props.query);
        let list_props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: props.selected,
            is_focused: props.is_focused,
            style: Self::list_style(),
            behavior: SelectListBehavior::default(),
            on_select: props.on_select,
            render_item: &|item| item.clone(),
        };
        self.list.render(frame, list_area, list_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn press(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn props<'a>(query: &'a str, suggestions: &'a [Suggestion]) -> SearchBarProps<'a> {
        SearchBarProps {
            query,
            suggestions,
            selected: 0,
            is_focused: true,
            on_query_change: Action::QueryChange,
            on_select: Action::SuggestSelect,
        }
    }

    fn delhi() -> Vec<Suggestion> {
        vec![Suggestion {
            name: "Delhi".into(),
            country: "India".into(),
        }]
    }

    #[test]
    fn test_enter_submits_without_dropdown() {
        let mut bar = SearchBar::new();
        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Enter), props("Delhi", &[]))
            .into_iter()
            .collect();
        actions.assert_count(1);
        actions.assert_first(Action::ReportFetch);
    }

    #[test]
    fn test_enter_picks_with_dropdown() {
        let mut bar = SearchBar::new();
        let suggestions = delhi();
        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Enter), props("Del", &suggestions))
            .into_iter()
            .collect();
        actions.assert_first(Action::SuggestPick);
    }

    #[test]
    fn test_esc_dismisses_then_quits() {
        let mut bar = SearchBar::new();
        let suggestions = delhi();

        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Esc), props("Del", &suggestions))
            .into_iter()
            .collect();
        actions.assert_first(Action::SuggestDismiss);

        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Esc), props("Del", &[]))
            .into_iter()
            .collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut bar = SearchBar::new();
        let event = EventKind::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let actions: Vec<_> = bar
            .handle_event(&event, props("Del", &[]))
            .into_iter()
            .collect();
        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut bar = SearchBar::new();
        let mut p = props("Del", &[]);
        p.is_focused = false;
        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Enter), p)
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    fn type_into(bar: &mut SearchBar, query: &mut String, text: &str) {
        for c in text.chars() {
            let actions: Vec<_> = bar
                .handle_event(&press(KeyCode::Char(c)), props(query, &[]))
                .into_iter()
                .collect();
            match actions.first() {
                Some(Action::QueryChange(value)) => *query = value.clone(),
                other => panic!("expected QueryChange, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_typing_after_pick_appends_to_picked_name() {
        let mut bar = SearchBar::new();
        let mut query = String::new();
        type_into(&mut bar, &mut query, "Del");
        assert_eq!(query, "Del");

        let suggestions = delhi();
        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Enter), props(&query, &suggestions))
            .into_iter()
            .collect();
        actions.assert_first(Action::SuggestPick);

        // Reducer replaces the query with the picked name
        let mut query = "Delhi".to_string();
        type_into(&mut bar, &mut query, "x");
        assert_eq!(query, "Delhix");
    }

    #[test]
    fn test_typing_after_multibyte_pick() {
        let mut bar = SearchBar::new();
        let mut query = String::new();
        type_into(&mut bar, &mut query, "Malmo");

        let mut query = "Malmö".to_string();
        type_into(&mut bar, &mut query, "x");
        assert_eq!(query, "Malmöx");
    }

    #[test]
    fn test_mid_text_edit_keeps_cursor() {
        let mut bar = SearchBar::new();
        let mut query = String::new();
        type_into(&mut bar, &mut query, "Del");

        let actions: Vec<_> = bar
            .handle_event(&press(KeyCode::Left), props(&query, &[]))
            .into_iter()
            .collect();
        actions.assert_first(Action::Render);

        type_into(&mut bar, &mut query, "x");
        assert_eq!(query, "Dexl");
    }

    #[test]
    fn test_render_dropdown_label() {
        let mut render = RenderHarness::new(60, 12);
        let mut bar = SearchBar::new();
        let suggestions = delhi();

        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), props("Del", &suggestions));
        });

        assert!(output.contains("Delhi, India"), "dropdown entry:\n{output}");
        assert!(output.contains(BUTTON_LABEL));
    }
}
