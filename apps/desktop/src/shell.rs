//! Line-oriented front end over [`DirectoryController`]: one command per
//! line, the screen re-rendered after each one.

use std::io::{self, BufRead, Write};

use client_core::{ApiGateway, Confirm, DeleteOutcome, DirectoryController, FormError};
use shared::domain::{EmployeeField, EmployeeId};
use tracing::debug;

pub const HELP: &str = "\
commands:
  new                    open the form for a new employee
  edit <id>              open the form with an employee's values
  set <field> <value>    fill a form field (nombre, documento, correo, telefono, area, sueldo, fecha_ingreso)
  submit                 save the open form
  cancel | close         discard the open form
  delete <id>            delete an employee (asks first)
  dismiss                hide the error banner
  refresh                reload the list
  show                   redraw the screen
  help                   this text
  quit                   leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    New,
    Edit(EmployeeId),
    Set(EmployeeField, String),
    Submit,
    Cancel,
    Close,
    Delete(EmployeeId),
    Dismiss,
    Refresh,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Keep going, but tell the user something first.
    Notice(String),
    Quit,
}

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "new" => ShellCommand::New,
        "edit" => ShellCommand::Edit(parse_id(rest)?),
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if field.is_empty() {
                return Err("usage: set <field> <value>".to_string());
            }
            let field = field.parse::<EmployeeField>().map_err(|err| err.to_string())?;
            ShellCommand::Set(field, value.trim().to_string())
        }
        "submit" | "save" => ShellCommand::Submit,
        "cancel" => ShellCommand::Cancel,
        "close" => ShellCommand::Close,
        "delete" => ShellCommand::Delete(parse_id(rest)?),
        "dismiss" => ShellCommand::Dismiss,
        "refresh" => ShellCommand::Refresh,
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}

fn parse_id(raw: &str) -> Result<EmployeeId, String> {
    raw.parse::<i64>()
        .map(EmployeeId)
        .map_err(|_| format!("expected an employee id, got '{raw}'"))
}

pub async fn execute<G: ApiGateway>(
    controller: &mut DirectoryController<G>,
    command: ShellCommand,
    confirm: &mut dyn Confirm,
) -> Flow {
    debug!(?command, "shell command");
    match command {
        ShellCommand::New => form_result(controller.open_create()),
        ShellCommand::Edit(id) => form_result(controller.open_edit(id)),
        ShellCommand::Set(field, value) => form_result(controller.set_field(field, value)),
        ShellCommand::Submit => match controller.submit().await {
            Ok(()) => Flow::Continue,
            // Already on the banner.
            Err(FormError::Gateway(_)) => Flow::Continue,
            Err(err) => Flow::Notice(err.to_string()),
        },
        ShellCommand::Cancel => {
            controller.cancel();
            Flow::Continue
        }
        ShellCommand::Close => {
            controller.close();
            Flow::Continue
        }
        ShellCommand::Delete(id) => match controller.delete(id, confirm).await {
            Ok(DeleteOutcome::Declined) => Flow::Notice("delete cancelled".to_string()),
            Ok(DeleteOutcome::Deleted) | Err(_) => Flow::Continue,
        },
        ShellCommand::Dismiss => {
            controller.dismiss_banner();
            Flow::Continue
        }
        ShellCommand::Refresh => {
            controller.refresh().await;
            Flow::Continue
        }
        ShellCommand::Show => Flow::Continue,
        ShellCommand::Help => Flow::Notice(HELP.to_string()),
        ShellCommand::Quit => Flow::Quit,
    }
}

fn form_result(result: Result<(), FormError>) -> Flow {
    match result {
        Ok(()) => Flow::Continue,
        Err(err) => Flow::Notice(err.to_string()),
    }
}

/// Asks on `out` and reads the answer from `input`. Only `y`/`yes` count.
fn ask_yes_no<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> bool {
    if write!(out, "{prompt} [y/N] ").and_then(|_| out.flush()).is_err() {
        return false;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

pub async fn run<G: ApiGateway>(controller: &mut DirectoryController<G>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(controller, &mut stdin.lock(), &mut stdout.lock()).await
}

/// The interactive loop over any line source; ends on `quit` or end of input.
pub async fn run_with<G, R, W>(
    controller: &mut DirectoryController<G>,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()>
where
    G: ApiGateway,
    R: BufRead,
    W: Write,
{
    controller.start_loading();
    writeln!(out, "{}", controller.view())?;
    out.flush()?;
    controller.mount().await;
    writeln!(out, "{}", controller.view())?;
    writeln!(out, "type 'help' for commands")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };

        let flow = {
            let mut confirm = |prompt: &str| ask_yes_no(&mut *input, &mut *out, prompt);
            execute(controller, command, &mut confirm).await
        };
        match flow {
            Flow::Quit => break,
            Flow::Notice(message) => {
                writeln!(out, "{}", controller.view())?;
                writeln!(out, "{message}")?;
            }
            Flow::Continue => writeln!(out, "{}", controller.view())?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
