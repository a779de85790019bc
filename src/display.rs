use crate::crtc::FrameSnapshot;
use crate::geometry::ColorScheme;
use crossterm::{cursor, execute, terminal};
use std::io;
use tui::backend::{Backend, CrosstermBackend};
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, Borders, Paragraph};
use tui::Terminal;

/// Display is what the frame loop hands each snapshot to. It should abstract
/// the implementation details, so a variety of kinds of screen would work.
pub trait Display {
    /// draw one frame of the character screen
    fn draw(&mut self, frame: &FrameSnapshot) -> Result<(), io::Error>;
}

/// what a terminal can show for a character code
fn cell_char(code: u8) -> char {
    match code {
        0x20..=0x7e => code as char,
        _ => '.',
    }
}

fn scheme_colour(scheme: ColorScheme) -> Color {
    match scheme {
        ColorScheme::White => Color::White,
        ColorScheme::Green => Color::Green,
        ColorScheme::Amber => Color::Yellow,
    }
}

/// turn the visible rows into styled terminal lines, with the cursor cell
/// reversed when it's showing
fn frame_lines(frame: &FrameSnapshot) -> Vec<Spans<'static>> {
    let style = Style::default().fg(scheme_colour(frame.geometry.color_scheme));
    (1..=frame.geometry.rows)
        .map(|row| {
            let text: String = frame.row(row).iter().map(|c| cell_char(*c)).collect();
            if !(frame.cursor.visible && frame.cursor.row == row) {
                return Spans::from(Span::styled(text, style));
            }
            // every char is ascii, so byte and char indices agree
            let col = frame.cursor.column - 1;
            Spans::from(vec![
                Span::styled(text[..col].to_string(), style),
                Span::styled(
                    text[col..col + 1].to_string(),
                    style.add_modifier(Modifier::REVERSED),
                ),
                Span::styled(text[col + 1..].to_string(), style),
            ])
        })
        .collect()
}

/// Draw a frame into any TUI terminal. The bordered screen sits in the top
/// left corner and is cut down to whatever the terminal can actually show.
pub fn draw_to<B: Backend>(
    terminal: &mut Terminal<B>,
    frame: &FrameSnapshot,
) -> Result<(), io::Error> {
    let lines = frame_lines(frame);
    let width = u16::try_from(frame.geometry.columns)
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let height = u16::try_from(frame.geometry.rows)
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let size = Rect::new(0, 0, width, height);
    terminal.draw(|f| {
        let area = size.intersection(f.size());
        let screen = Paragraph::new(lines.clone()).block(
            Block::default()
                .title("CRTC")
                .borders(Borders::ALL)
                .style(Style::default().bg(Color::Black)),
        );
        f.render_widget(screen, area);
    })?;
    Ok(())
}

/// the character screen in a terminal, rendered using TUI and crossterm
pub struct TermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TermDisplay {
    pub fn new() -> Result<TermDisplay, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(TermDisplay { terminal })
    }
}

impl Drop for TermDisplay {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
    }
}

impl Display for TermDisplay {
    fn draw(&mut self, frame: &FrameSnapshot) -> Result<(), io::Error> {
        draw_to(&mut self.terminal, frame)
    }
}

/// useful for testing non-display routines
#[derive(Default)]
pub struct DummyDisplay {
    pub frames: usize,
    pub last_cursor_visible: Option<bool>,
}

impl DummyDisplay {
    pub fn new() -> Self {
        DummyDisplay::default()
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, frame: &FrameSnapshot) -> Result<(), io::Error> {
        self.frames += 1;
        self.last_cursor_visible = Some(frame.cursor.visible);
        Ok(())
    }
}
