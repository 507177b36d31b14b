use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, ColorStop, Fill, LinearGradient, Renderer,
    fonts, integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::LOADING_ANIM_CYCLE_TICKS;

pub const APP_TITLE: &str = "DailyWeather";
pub const APP_SUBTITLE: &str = "Weather, air quality, UV index & traffic, all in one place";

/// Title rows (FIGlet) + subtitle row.
pub const HEADER_HEIGHT: u16 = 5;

pub struct TitleHeader;

pub struct TitleHeaderProps {
    pub is_animating: bool,
    pub tick_count: u32,
}

const START: (u8, u8, u8) = (37, 99, 235); // Button blue
const END: (u8, u8, u8) = (100, 200, 220); // Teal

/// Two-colour gradient whose colours swap back and forth as `phase` goes 0 → 1.
fn title_gradient(phase: f32) -> Fill {
    let a = ArtColor::rgb(START.0, START.1, START.2);
    let b = ArtColor::rgb(END.0, END.1, END.2);
    // Triangle wave so the cycle wraps without a jump
    let t = 1.0 - (2.0 * phase.rem_euclid(1.0) - 1.0).abs();
    let edge = a.interpolate(b, t);
    let mid = b.interpolate(a, t);
    Fill::Linear(LinearGradient::new(
        5.0,
        vec![
            ColorStop::new(0.0, edge),
            ColorStop::new(0.5, mid),
            ColorStop::new(1.0, edge),
        ],
    ))
}

fn animated_phase(tick_count: u32) -> f32 {
    let steps = LOADING_ANIM_CYCLE_TICKS.max(1);
    (tick_count % steps) as f32 / steps as f32
}

impl Component<Action> for TitleHeader {
    type Props<'a> = TitleHeaderProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        // One row: plain title + subtitle, no FIGlet
        if area.height < HEADER_HEIGHT {
            let (r, g, b) = START;
            let line = Line::from(vec![
                Span::styled(
                    APP_TITLE,
                    Style::default()
                        .fg(Color::Rgb(r, g, b))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(APP_SUBTITLE, Style::default().fg(Color::DarkGray)),
            ])
            .centered();
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // FIGlet title, artbox picks the font that fits
            Constraint::Length(1), // Subtitle
        ])
        .split(area);

        let phase = if props.is_animating {
            animated_phase(props.tick_count)
        } else {
            0.0
        };

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(title_gradient(phase));
        frame.render_widget(ArtBox::new(&renderer, APP_TITLE), chunks[0]);

        let subtitle = Line::from(vec![Span::styled(
            APP_SUBTITLE,
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(subtitle), chunks[1]);
    }
}
