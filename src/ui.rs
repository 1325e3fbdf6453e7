use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use intuit::game::{Game, Phase};

use crate::{App, Screen};

const HORIZONTAL_MARGIN: u16 = 4;
const VERTICAL_MARGIN: u16 = 1;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Intro => render_intro(self, area, buf),
            Screen::Game => {
                if self.game.is_over() {
                    render_game_over(self, area, buf);
                } else {
                    render_playing(self, area, buf);
                }
            }
        }
    }
}

fn render_intro(app: &App, area: Rect, buf: &mut Buffer) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let lines = vec![
        Line::from(Span::styled(
            "i n t u i t",
            bold.fg(Color::Magenta),
        )),
        Line::default(),
        Line::from(Span::styled(
            "How well do you trust your intuition?",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from("A number hides behind the center card."),
        Line::from("Pick the matching card before the clock runs out."),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "cards: {}   clock: {}s   policy: {}",
                app.config.choice_count, app.config.round_secs, app.config.failure_policy
            ),
            dim,
        )),
        Line::default(),
        Line::from(Span::styled("press enter to begin · esc to quit", bold)),
    ];

    centered_paragraph(lines, area, buf);
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let game = &app.game;
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // countdown gauge
            Constraint::Min(7),    // target + choice cards
            Constraint::Length(2), // feedback line
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(format!("Round {}", game.round_number), bold.fg(Color::Cyan)),
        Span::raw("   "),
        Span::styled(format!("Score: {}", game.score), bold),
    ]));
    header.render(chunks[0], buf);

    render_countdown(game, chunks[1], buf);

    let card_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    render_target_card(game, card_area[0], buf);
    render_choice_cards(game, card_area[1], buf);

    let message = match game.phase {
        Phase::Playing => "How well do you trust your intuition?",
        Phase::Correct => "Your intuition was right! Next round...",
        Phase::Wrong => "Not this time. Get ready...",
        Phase::Timeout => "Time's up! Get ready...",
        Phase::GameOver => "",
    };
    let feedback = Paragraph::new(Span::styled(
        message,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    feedback.render(chunks[3], buf);
}

fn render_countdown(game: &Game, area: Rect, buf: &mut Buffer) {
    let budget = game.config.round_secs.max(1);
    let ratio = f64::from(game.clock) / f64::from(budget);
    let color = if game.clock <= 3 {
        Color::Red
    } else {
        Color::Green
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" time "))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{}s", game.clock));
    gauge.render(area, buf);
}

fn render_target_card(game: &Game, area: Rect, buf: &mut Buffer) {
    let content: Vec<Line> = if game.reveal_target {
        vec![Line::from(Span::styled(
            game.round.target.to_string(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))]
    } else {
        vec![
            Line::from(Span::styled(
                "Trust Your",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                "Intuition",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            )),
        ]
    };

    // pad above the content to center it vertically inside the borders
    let inner_height = area.height.saturating_sub(2) as usize;
    let pad = inner_height.saturating_sub(content.len()) / 2;
    let mut lines = vec![Line::default(); pad];
    lines.extend(content);

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" target "))
        .alignment(Alignment::Center);
    card.render(area, buf);
}

fn render_choice_cards(game: &Game, area: Rect, buf: &mut Buffer) {
    let count = game.round.choices.len() as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (index, value) in game.round.choices.iter().enumerate() {
        let picked = game.selected == Some(index);
        let style = if picked && game.phase == Phase::Correct {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else if picked {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let inner_height = slots[index].height.saturating_sub(2) as usize;
        let pad = inner_height.saturating_sub(1) / 2;
        let mut lines = vec![Line::default(); pad];
        lines.push(Line::from(Span::styled(value.to_string(), style)));

        let card = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", index + 1)),
            )
            .alignment(Alignment::Center);
        card.render(slots[index], buf);
    }
}

fn render_game_over(app: &App, area: Rect, buf: &mut Buffer) {
    let score = app.game.score;
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().add_modifier(Modifier::DIM);

    let rounds_word = if score == 1 { "round" } else { "rounds" };
    let tier = match score {
        0 => "Trust takes practice. Try again!",
        1..=3 => "Not bad! Your intuition is developing.",
        4..=7 => "Impressive! You have strong intuitive abilities.",
        _ => "Incredible! Your intuition is truly remarkable.",
    };

    let lines = vec![
        Line::from(Span::styled("Game Over", bold.fg(Color::Red))),
        Line::default(),
        Line::from(vec![
            Span::raw("Your intuition guided you through "),
            Span::styled(score.to_string(), bold.fg(Color::Cyan)),
            Span::raw(format!(" {rounds_word}")),
        ]),
        Line::from(tier),
        Line::default(),
        Line::from(Span::styled("(r) play again   (esc) quit", bold)),
        Line::from(Span::styled(
            format!(
                "(p) policy: {}   (c) cards: {}   (m) sound: {}",
                app.config.failure_policy,
                app.config.choice_count,
                if app.config.sound { "on" } else { "off" }
            ),
            dim,
        )),
    ];

    centered_paragraph(lines, area, buf);
}

fn centered_paragraph(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    widget.render(chunks[1], buf);
}
