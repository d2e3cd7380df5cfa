use super::app::{App, Mode, JUMP_PROMPT};
use super::commands::Command;
use super::frame::BoxChars;
use super::styled::page_lines;
use super::{CHROME_COLS, CHROME_ROWS};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Paragraph, Widget};
use ratatui::Frame;

impl App {
    pub(super) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer = match &self.mode {
            Mode::Jumping { input } => Footer::Prompt {
                prompt: JUMP_PROMPT,
                input,
            },
            _ => Footer::Hints(self.commands()),
        };
        let chrome = Chrome {
            chars: self.chars,
            title: self.pager.title(),
            status: self.status(),
            footer,
            message: self.message.as_deref(),
        };
        frame.render_widget(chrome, area);

        let lines = page_lines(self.pager.page(self.nav.current()));
        frame.render_widget(Paragraph::new(lines), page_area(area));
    }
}

/// Text area inside the frame: one border cell plus one blank cell of
/// padding on every side.
fn page_area(area: Rect) -> Rect {
    Rect::new(
        area.x + CHROME_COLS / 2,
        area.y + CHROME_ROWS / 2,
        area.width.saturating_sub(CHROME_COLS),
        area.height.saturating_sub(CHROME_ROWS),
    )
}

enum Footer<'a> {
    Hints(Vec<Command>),
    Prompt { prompt: &'a str, input: &'a str },
}

/// Frame, status fields and the bottom line of hints or prompt.
struct Chrome<'a> {
    chars: BoxChars,
    title: &'a str,
    status: String,
    footer: Footer<'a>,
    message: Option<&'a str>,
}

impl Widget for Chrome<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let plain = Style::default();
        let chars = self.chars;
        let inner = usize::from(area.width - 2);
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        let top = format!("{}{}{}", chars.ltop, chars.top.to_string().repeat(inner), chars.rtop);
        buf.set_string(area.x, area.y, top, plain);
        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, chars.side.to_string(), plain);
            buf.set_string(right, y, chars.side.to_string(), plain);
        }
        let bot = format!("{}{}{}", chars.lbot, chars.bot.to_string().repeat(inner), chars.rbot);
        buf.set_string(area.x, bottom, bot, plain);

        let room = inner;
        if !self.title.is_empty() {
            buf.set_stringn(area.x + 1, area.y, chars.field(self.title), room, plain);
        }
        let status = chars.field(&self.status);
        let status_width = status.chars().count() as u16;
        if status_width + 2 <= area.width {
            buf.set_string(right - status_width, area.y, status, plain);
        }

        let mut x = area.x + 1;
        match self.footer {
            Footer::Hints(commands) => {
                for command in commands {
                    let hint = chars.field(&command.label());
                    let used = usize::from(x - area.x - 1);
                    let (next_x, _) =
                        buf.set_stringn(x, bottom, hint, room.saturating_sub(used), plain);
                    x = next_x;
                }
            }
            Footer::Prompt { prompt, input } => {
                x = area.x + 2;
                let text = format!("{}{prompt} > {input}", chars.rside);
                let room = usize::from(area.width.saturating_sub(4));
                let (cursor_x, _) = buf.set_stringn(x, bottom, text, room, plain);
                if cursor_x + 1 < right {
                    let reversed = plain.add_modifier(Modifier::REVERSED);
                    buf.set_string(cursor_x, bottom, " ", reversed);
                    buf.set_string(cursor_x + 1, bottom, chars.lside.to_string(), plain);
                    x = cursor_x + 2;
                } else {
                    x = cursor_x;
                }
            }
        }

        if let Some(message) = self.message {
            let field = chars.field(message);
            let width = field.chars().count() as u16;
            let start = right.saturating_sub(width);
            if start > x {
                buf.set_string(start, bottom, field, plain.add_modifier(Modifier::BOLD));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::Pager;
    use crate::reflow::WrapMode;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen(app: &App, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|frame| app.draw(frame)).expect("draw");
        let buffer = terminal.backend().buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect()
    }

    fn app(text: &str, width: u16, height: u16) -> App {
        let pager = Pager::new(text, "menu.txt", 1, 1, WrapMode::NoWrap);
        let mut app = App::new(pager, BoxChars::default());
        app.resize(height, width);
        app
    }

    #[test]
    fn draws_frame_status_page_and_hints() {
        let app = app("spam\neggs\nham", 20, 7);
        assert_eq!(
            screen(&app, 20, 7),
            vec![
                "┌┤menu.txt├───┤1/1├┐",
                "│                  │",
                "│ spam             │",
                "│ eggs             │",
                "│ ham              │",
                "│                  │",
                "└┤Flow├┤Jump├┤eXit├┘",
            ]
        );
    }

    #[test]
    fn middle_page_offers_back_and_next() {
        let mut app = app("a\nb\nc\nd\ne\nf\ng", 40, 6);
        app.next();
        let rows = screen(&app, 40, 6);
        assert!(rows[0].contains("┤2/4├"), "{rows:?}");
        assert!(rows[5].starts_with("└┤Back├┤Flow├┤Jump├┤Next├┤eXit├"), "{rows:?}");
    }

    #[test]
    fn jump_prompt_replaces_hints() {
        let mut app = app("spam", 40, 6);
        app.start_jump();
        app.push_input('2');
        let rows = screen(&app, 40, 6);
        assert!(rows[5].contains("┤Jump to page > 2 ├"), "{rows:?}");
        assert!(!rows[5].contains("Flow"), "{rows:?}");
    }

    #[test]
    fn message_is_shown_on_bottom_border() {
        let mut app = app("spam", 60, 6);
        app.start_jump();
        app.push_input('9');
        app.submit_jump();
        let rows = screen(&app, 60, 6);
        assert!(
            rows[5].contains("┤page 9 is out of range (pages 1-1)├"),
            "{rows:?}"
        );
    }
}
