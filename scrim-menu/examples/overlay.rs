//! Terminal demo host.
//!
//! Renders the menu tree into a raw-mode terminal, one cell per "pixel", and
//! pumps crossterm events through the context. Click headers to expand,
//! drag a header to move the surface, press 'q' to quit.

use std::io::{Stdout, Write, stdout};
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode};
use crossterm::style::Print;
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{cursor, execute, queue};
use simplelog::{Config, LevelFilter, WriteLogger};
use unicode_width::UnicodeWidthStr;

use scrim_menu::prelude::*;
use scrim_menu::values::ControlState;

/// Theme drawing each component as one row of terminal cells.
struct TerminalTheme {
    out: Stdout,
}

impl TerminalTheme {
    fn new() -> Self {
        Self { out: stdout() }
    }

    fn put(&mut self, x: i32, y: i32, text: &str) {
        if x < 0 || y < 0 {
            return;
        }
        let _ = queue!(self.out, cursor::MoveTo(x as u16, y as u16), Print(text));
    }
}

impl Theme for TerminalTheme {
    fn container_height(&self) -> i32 {
        1
    }

    fn menu_width(&self, menu: &Menu) -> i32 {
        UnicodeWidthStr::width(menu.display_name()) as i32 + 4
    }

    fn control_width(&self, control: &Control) -> i32 {
        let extra = match control.kind() {
            ValueKind::Slider => 18,
            ValueKind::List => 12,
            ValueKind::Keybind => 10,
            ValueKind::Checkbox => 4,
            ValueKind::Button | ValueKind::Separator => 2,
        };
        UnicodeWidthStr::width(control.display_name()) as i32 + extra
    }

    fn draw_menu(&mut self, menu: &Menu) {
        let arrow = if menu.toggled() { "▾" } else { "▸" };
        let marker = if menu.hovering() { ">" } else { " " };
        let label = format!("{marker}{} {arrow}", menu.display_name());
        let position = menu.position();
        self.put(position.x, position.y, &label);
    }

    fn draw_control(&mut self, control: &Control) {
        let label = match control.state() {
            ControlState::Slider(slider) => {
                let span = (slider.max() - slider.min()).max(1);
                let filled = ((slider.value() - slider.min()) * 10 / span) as usize;
                format!(
                    "{} [{}{}] {}",
                    control.display_name(),
                    "#".repeat(filled),
                    "-".repeat(10 - filled),
                    slider.value()
                )
            }
            ControlState::Checkbox(checkbox) => {
                let mark = if checkbox.checked() { "x" } else { " " };
                format!("{} [{mark}]", control.display_name())
            }
            ControlState::List(list) => {
                format!("{} ‹ {} ›", control.display_name(), list.selected().unwrap_or("-"))
            }
            ControlState::Keybind(keybind) => {
                let key = if keybind.capturing() {
                    "...".to_string()
                } else {
                    keybind.key().map_or("unset".to_string(), |key| format!("{key:?}"))
                };
                let state = if keybind.active() { "*" } else { " " };
                format!("{} [{key}]{state}", control.display_name())
            }
            ControlState::Button(button) => {
                if button.pressed() {
                    format!("({}!)", control.display_name())
                } else {
                    format!("({})", control.display_name())
                }
            }
            ControlState::Separator => "─".repeat(control.slot_width().max(2) as usize),
        };
        let position = control.position();
        self.put(position.x, position.y, &label);
    }
}

fn build_menus(ctx: &mut MenuContext) -> Result<(), MenuError> {
    let mut combat = Menu::root("combat", "Combat");
    combat.add(Control::slider("range", "Range", 500, 0, 1000))?;
    combat.add(Control::keybind("toggle", "Active", Some(Key::Char(' ')), KeybindMode::Toggle))?;

    let mut harass = Menu::new("harass", "Harass");
    harass.add(Control::checkbox("enabled", "Enabled", true))?;
    harass.add(Control::slider("mana", "Min Mana", 40, 0, 100))?;
    combat.add(harass)?;
    ctx.attach(combat)?;

    let mut display = Menu::root("display", "Display");
    display.add(Control::list(
        "skin",
        "Skin",
        vec!["Classic".into(), "Dark".into(), "Light".into()],
        0,
    ))?;
    display.add(Control::separator("sep", ""))?;
    display.add(Control::button("reset", "Reset", || log::info!("reset pressed")))?;
    ctx.attach(display)?;

    ctx.root_mut("combat")
        .expect("combat root attached")
        .on_change(|event| log::info!("{} changed in {}", event.source, event.container));
    Ok(())
}

fn main() -> std::io::Result<()> {
    if let Ok(log_file) = std::fs::File::create("overlay-demo.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let store = JsonFileStore::default_location("scrim-demo")
        .unwrap_or_else(|| JsonFileStore::new(".scrim-demo"));
    let mut ctx = MenuContext::new("demo", TerminalTheme::new(), store);
    ctx.set_anchor(Point::new(2, 1));
    build_menus(&mut ctx).expect("menu construction");

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

    let mut cursor_at = Point::ZERO;
    'frame: loop {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Event::Key(key) = &event
                && key.code == KeyCode::Char('q')
            {
                break 'frame;
            }
            if let Some(message) = InputMessage::from_event(&event, cursor_at) {
                cursor_at = message.cursor;
                ctx.dispatch(&message);
            }
        }

        execute!(stdout(), Clear(ClearType::All))?;
        ctx.draw();
        ctx.update();
        stdout().flush()?;
        std::thread::sleep(Duration::from_millis(16));
    }

    if let Err(errors) = ctx.save_all() {
        log::warn!("{errors}");
    }

    execute!(stdout(), cursor::Show, DisableMouseCapture, LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}
