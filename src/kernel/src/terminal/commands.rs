//! Built-in shell commands.
//!
//! Commands live in a static table of `(name, summary, effect)` entries. A line
//! matches an entry only when it equals the name exactly; there is no argument
//! parsing.

use core::fmt::{self, Write};
use konsoli_common::{Attribute, Color, Modifiers};
use konsoli_hal::Console;

/// One entry of the command table.
#[derive(Clone, Copy)]
pub struct Command {
    /// Word typed at the prompt.
    pub name: &'static str,
    /// One-line description shown by `help`.
    pub summary: &'static str,
    /// Effect run on a match.
    pub run: fn(&mut CommandContext<'_>),
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .finish()
    }
}

/// What a command can see and touch while it runs.
pub struct CommandContext<'a> {
    console: &'a mut dyn Console,
    modifiers: Modifiers,
    commands: &'a [Command],
}

impl<'a> CommandContext<'a> {
    /// Builds a context over `console`.
    pub fn new(console: &'a mut dyn Console, modifiers: Modifiers, commands: &'a [Command]) -> Self {
        CommandContext {
            console,
            modifiers,
            commands,
        }
    }

    /// Writes text with the current colors.
    pub fn write(&mut self, s: &str) {
        self.console.write_str(s);
    }

    /// Writes text in `foreground`, keeping the background, then restores the colors.
    pub fn write_colored(&mut self, foreground: Color, s: &str) {
        let saved = self.console.attribute();
        let background = Attribute::from_byte(saved).background();
        self.console
            .set_attribute(Attribute::new(foreground, background).as_byte());
        self.console.write_str(s);
        self.console.set_attribute(saved);
    }

    /// Clears the screen.
    pub fn clear(&mut self) {
        self.console.clear();
    }

    /// Decoder modifier state at the time the line was entered.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The table the command was found in.
    pub fn commands(&self) -> &'a [Command] {
        self.commands
    }
}

impl fmt::Write for CommandContext<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.console.write_str(s);
        Ok(())
    }
}

/// The commands available at the prompt.
pub static BUILTIN_COMMANDS: [Command; 5] = [
    Command {
        name: "help",
        summary: "Show this help",
        run: cmd_help,
    },
    Command {
        name: "clear",
        summary: "Clear screen",
        run: cmd_clear,
    },
    Command {
        name: "hello",
        summary: "Say hello",
        run: cmd_hello,
    },
    Command {
        name: "info",
        summary: "Show keyboard state",
        run: cmd_info,
    },
    Command {
        name: "test",
        summary: "Test special keys",
        run: cmd_test,
    },
];

/// Runs the first command whose name equals `line`.
///
/// Returns `false` and prints an "unknown command" message when nothing matches.
pub fn dispatch(commands: &[Command], line: &str, context: &mut CommandContext<'_>) -> bool {
    match commands.iter().find(|command| command.name == line) {
        Some(command) => {
            log::debug!("dispatching {:?}", command.name);
            (command.run)(context);
            true
        }
        None => {
            log::debug!("unknown command {:?}", line);
            context.write_colored(Color::LightRed, "Unknown command: ");
            context.write(line);
            context.write(" (type 'help' for commands)\n");
            false
        }
    }
}

/// Display help information.
fn cmd_help(context: &mut CommandContext<'_>) {
    context.write_colored(Color::Cyan, "Available commands:\n");
    for command in context.commands() {
        let _ = writeln!(context, "  {:<6} - {}", command.name, command.summary);
    }
}

fn cmd_clear(context: &mut CommandContext<'_>) {
    context.clear();
}

fn cmd_hello(context: &mut CommandContext<'_>) {
    context.write("Hello, User!\n");
}

/// Report the decoder's modifier and lock state.
fn cmd_info(context: &mut CommandContext<'_>) {
    let modifiers = context.modifiers();
    let rows = [
        ("Shift", modifiers.shift()),
        ("Ctrl", modifiers.ctrl()),
        ("Alt", modifiers.alt()),
        ("Caps", modifiers.caps_lock()),
        ("Num", modifiers.num_lock()),
    ];

    context.write_colored(Color::Cyan, "Keyboard state:\n");
    for (name, on) in rows {
        let _ = write!(context, "  {:<6} ", name);
        if on {
            context.write_colored(Color::LightGreen, "ON\n");
        } else {
            context.write_colored(Color::DarkGray, "OFF\n");
        }
    }
}

fn cmd_test(context: &mut CommandContext<'_>) {
    context.write("Try: Arrow keys, F1-F12, Insert, Delete, Home, End\n");
    context.write("     Shift+letters, number symbols, Caps Lock\n");
}
