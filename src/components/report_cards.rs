use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Padding, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;
use crate::indicators::{Severity, WeatherCondition};
use crate::state::CityReport;

/// Narrower than this and the cards stack in one column.
pub const GRID_MIN_WIDTH: u16 = 60;

/// City heading + the four fixed cards
pub struct ReportCards;

pub struct ReportCardsProps<'a> {
    pub report: &'a CityReport,
}

struct Card<'a> {
    title: String,
    accent: Color,
    lines: Vec<Line<'a>>,
}

fn label_value<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn cards(report: &CityReport) -> [Card<'_>; 4] {
    let weather = &report.weather;
    let condition = WeatherCondition::from_label(&weather.condition);

    let aqi_severity = Severity::from_label(&report.air_quality.category);
    let uv_severity = Severity::from_label(&report.uv_index.risk);
    let traffic_severity = Severity::from_label(&report.traffic.level);

    [
        Card {
            title: format!("{} Weather", condition.emoji()),
            accent: Color::Rgb(100, 180, 255),
            lines: vec![
                label_value("Temperature: ", format!("{} °C", weather.temp)),
                label_value("Feels Like: ", format!("{} °C", weather.feels_like)),
                label_value("Condition: ", weather.condition.clone()),
                label_value("Humidity: ", format!("{}%", weather.humidity)),
            ],
        },
        Card {
            title: "\u{1f32b}\u{fe0f} Air Quality".to_string(),
            accent: aqi_severity.color(),
            lines: vec![
                label_value("AQI: ", report.air_quality.aqi.to_string()),
                Line::from(Span::styled(
                    report.air_quality.category.as_str(),
                    Style::default().fg(aqi_severity.color()).bold(),
                )),
            ],
        },
        Card {
            title: "\u{2600}\u{fe0f} UV Index".to_string(),
            accent: uv_severity.color(),
            lines: vec![
                label_value("Value: ", report.uv_index.value.to_string()),
                Line::from(vec![
                    Span::styled("Risk: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        report.uv_index.risk.as_str(),
                        Style::default().fg(uv_severity.color()).bold(),
                    ),
                ]),
            ],
        },
        Card {
            title: "\u{1f6a6} Traffic".to_string(),
            accent: traffic_severity.color(),
            lines: vec![
                Line::from(vec![
                    Span::styled("Level: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        report.traffic.level.as_str(),
                        Style::default().fg(traffic_severity.color()).bold(),
                    ),
                ]),
                Line::from(Span::styled(
                    report.traffic.note.as_str(),
                    Style::default().fg(Color::Gray).italic(),
                )),
            ],
        },
    ]
}

fn render_card(frame: &mut Frame, area: Rect, card: Card<'_>) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(card.accent))
        .title(Span::styled(format!(" {} ", card.title), Style::default().bold()))
        .padding(Padding::horizontal(1));
    let body = Paragraph::new(card.lines)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(body, area);
}

/// Card slots: 2×2 when wide, one column when narrow.
fn card_areas(area: Rect) -> Vec<Rect> {
    if area.width >= GRID_MIN_WIDTH {
        let rows = Layout::vertical([Constraint::Length(7), Constraint::Length(7)]).split(area);
        rows.iter()
            .flat_map(|row| {
                Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .spacing(1)
                    .split(*row)
                    .to_vec()
            })
            .collect()
    } else {
        Layout::vertical([
            Constraint::Length(7),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
        ])
        .split(area)
        .to_vec()
    }
}

impl Component<Action> for ReportCards {
    type Props<'a> = ReportCardsProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [heading_area, grid_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

        let heading = Line::from(Span::styled(
            format!("{}, {}", props.report.city, props.report.country),
            Style::default().fg(Color::White).bold(),
        ));
        frame.render_widget(Paragraph::new(heading), heading_area);

        for (card, slot) in cards(props.report).into_iter().zip(card_areas(grid_area)) {
            render_card(frame, slot, card);
        }
    }
}
