use crate::grid::Grid;
use crate::TermInt;
use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read, poll};

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    frame: Vec<String>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: (TermInt, TermInt),
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;
        Ok(TermManager { width, height, stdout: stdout(), frame: vec![], current_msg: None })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))
            .context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    /// Drains the key presses that arrived since the last call, without waiting.
    pub fn read_key_events_queue(&self) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }

    pub fn get_terminal_size(&self) -> (TermInt, TermInt) {
        (self.width, self.height)
    }

    /// Draws the bordered grid at the top left of the screen with the score below it.
    pub fn draw_frame(&mut self, grid: &Grid, score: u32) -> Result<()> {
        let mut lines = grid.framed_lines();
        lines.push(format!("Score: {:<8}", score));

        for (y, line) in lines.iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, y as TermInt), style::Print(line))?;
        }

        self.frame = lines;
        self.current_msg = None;
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg_height = (lines.len() + 2) as TermInt;
        let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;

        // Centre on the frame when one is drawn, otherwise on the whole terminal
        let (area_w, area_h) = match self.frame.first() {
            Some(edge) => (edge.chars().count() as TermInt, self.frame.len() as TermInt),
            None => (self.width, self.height),
        };
        let top_left = (
            (area_w / 2).saturating_sub(msg_width / 2),
            (area_h / 2).saturating_sub(msg_height / 2),
        );

        // Blank top and bottom rows around the text
        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1] {
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.current_msg = Some(Message::new(msg_width, msg_height, top_left));
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Put back whatever part of the frame the box covered
        let (left, top) = msg.top_left();
        for y in top..top + msg.height() {
            let restored: String = match self.frame.get(y as usize) {
                Some(row) => row.chars().skip(left as usize).take(msg.width() as usize).collect(),
                None => String::new(),
            };
            let line = format!("{:<width$}", restored, width = msg.width() as usize);
            queue!(self.stdout, cursor::MoveTo(left, y), style::Print(line))?;
        }

        self.flush()
    }

    pub fn clear(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.frame.clear();
        self.current_msg = None;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }
}

impl Message {
    pub fn new(width: TermInt, height: TermInt, top_left: (TermInt, TermInt)) -> Self {
        Message { width, height, top_left }
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    pub fn top_left(&self) -> (TermInt, TermInt) {
        self.top_left
    }
}
