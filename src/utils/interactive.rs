use crate::utils::error::{AppError, AppResult};
use crate::utils::output::OutputStyle;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, style,
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::str::FromStr;

fn terminal_error(e: io::Error) -> AppError {
    AppError::System(format!("Terminal error: {}", e))
}

pub fn prompt_input(prompt: &str) -> AppResult<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().to_string())
}

/// Empty input maps to `None`
pub fn prompt_optional(prompt: &str) -> AppResult<Option<String>> {
    let input = prompt_input(prompt)?;
    Ok((!input.is_empty()).then_some(input))
}

/// Re-ask until the answer parses; empty input maps to `None`
pub fn prompt_parsed<T: FromStr>(prompt: &str) -> AppResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    loop {
        let Some(input) = prompt_optional(prompt)? else {
            return Ok(None);
        };
        match input.parse::<T>() {
            Ok(value) => return Ok(Some(value)),
            Err(e) => println!("{}", OutputStyle::warning(&format!("Invalid value: {}", e))),
        }
    }
}

/// Comma separated list; blank entries are dropped
pub fn prompt_list(prompt: &str) -> AppResult<Option<Vec<String>>> {
    Ok(prompt_optional(prompt)?.map(|input| split_list(&input)))
}

pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn prompt_yes_no(prompt: &str) -> AppResult<bool> {
    loop {
        let input = prompt_input(&format!("{} [y/N]: ", prompt))?;
        match input.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "" => return Ok(false),
            _ => println!("Please enter 'y' or 'n'"),
        }
    }
}

pub fn select_from_list(items: &[String]) -> AppResult<Option<usize>> {
    if items.is_empty() {
        return Ok(None);
    }

    terminal::enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = io::stdout();

    let mut selected = 0;
    let result = loop {
        if let Err(e) = draw_list(&mut stdout, items, selected) {
            break Err(terminal_error(e));
        }

        match event::read() {
            Ok(Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            })) => match code {
                KeyCode::Up => selected = selected.saturating_sub(1),
                KeyCode::Down => {
                    if selected + 1 < items.len() {
                        selected += 1;
                    }
                }
                KeyCode::Enter => break Ok(Some(selected)),
                KeyCode::Char('q') | KeyCode::Esc => break Ok(None),
                _ => {}
            },
            Ok(_) => {}
            Err(e) => break Err(terminal_error(e)),
        }
    };

    terminal::disable_raw_mode().map_err(terminal_error)?;
    execute!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))
        .map_err(terminal_error)?;

    result
}

fn draw_list(stdout: &mut io::Stdout, items: &[String], selected: usize) -> io::Result<()> {
    execute!(
        stdout,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        style::Print("Use arrow keys to navigate, Enter to select, q to quit:\r\n\r\n")
    )?;

    for (i, item) in items.iter().enumerate() {
        if i == selected {
            execute!(
                stdout,
                style::SetForegroundColor(style::Color::Blue),
                style::Print(format!("> {}\r\n", item)),
                style::ResetColor
            )?;
        } else {
            execute!(stdout, style::Print(format!("  {}\r\n", item)))?;
        }
    }
    stdout.flush()
}
