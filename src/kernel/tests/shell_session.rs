//! Whole keyboard-to-screen sessions on an in-memory surface.

use konsoli_hal::KeyboardPort;
use konsoli_kernel::keyboard::{keymap, PolledKeyboard, ScancodeQueue, ScriptedScancodes};
use konsoli_kernel::terminal::{Command, CommandContext, TerminalConfig, BUILTIN_COMMANDS};
use konsoli_kernel::{Console, MemoryBuffer, Terminal};
use std::collections::VecDeque;

fn shout(context: &mut CommandContext<'_>) {
    context.write("A!\n");
}

static SHOUT_TABLE: [Command; 1] = [Command {
    name: "a",
    summary: "shout",
    run: shout,
}];

fn bare() -> TerminalConfig {
    TerminalConfig::DEFAULT.with_prompt("")
}

fn row_text<const W: usize, const H: usize>(
    console: &Console<MemoryBuffer<W, H>>,
    y: usize,
) -> String {
    let row = console.framebuffer().buffer().row_chars(y);
    String::from_utf8_lossy(&row).trim_end().to_string()
}

#[test]
fn test_typed_command_runs_from_table() {
    let mut console = Console::new(MemoryBuffer::<80, 25>::new());
    let mut terminal = Terminal::with_commands(&SHOUT_TABLE, bare());
    terminal.pump(&mut ScriptedScancodes::new(&[0x1E, 0x1C]), &mut console);

    assert_eq!(row_text(&console, 0), "a");
    assert_eq!(row_text(&console, 1), "A!");
    assert_eq!(console.cursor(), (0, 2));
}

#[test]
fn test_backspace_erases_one_cell() {
    let mut console = Console::new(MemoryBuffer::<80, 25>::new());
    let mut terminal = Terminal::with_commands(&SHOUT_TABLE, bare());
    // h i Backspace
    terminal.pump(
        &mut ScriptedScancodes::new(&[0x23, 0x17, keymap::BACKSPACE]),
        &mut console,
    );

    assert_eq!(terminal.input(), "h");
    assert_eq!(row_text(&console, 0), "h");
    assert_eq!(console.framebuffer().get(1, 0).unwrap().character, b' ');
    assert_eq!(console.cursor(), (1, 0));
}

#[test]
fn test_eleventh_character_wraps_on_narrow_screen() {
    let mut console = Console::new(MemoryBuffer::<10, 5>::new());
    let mut terminal = Terminal::with_commands(&SHOUT_TABLE, bare());
    // q w e r t y u i o p a
    let keys = [0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1E];
    terminal.pump(&mut ScriptedScancodes::new(&keys[..10]), &mut console);
    assert_eq!(console.cursor(), (0, 1));

    terminal.pump(&mut ScriptedScancodes::new(&keys[10..]), &mut console);
    assert_eq!(row_text(&console, 0), "qwertyuiop");
    assert_eq!(console.framebuffer().get(0, 1).unwrap().character, b'a');
    assert_eq!(console.cursor(), (1, 1));
}

#[test]
fn test_line_capacity_drops_overflow() {
    let mut console = Console::new(MemoryBuffer::<80, 25>::new());
    let mut terminal = Terminal::with_commands(&SHOUT_TABLE, bare());
    let keys = vec![0x1E; 81];
    terminal.pump(&mut ScriptedScancodes::new(&keys), &mut console);

    assert_eq!(terminal.input().len(), 79);
    assert_eq!(console.cursor(), (79, 0));
}

#[test]
fn test_unknown_command_then_prompt() {
    let mut console = Console::new(MemoryBuffer::<80, 25>::new());
    let mut terminal = Terminal::new();
    terminal.prompt(&mut console);
    // f o o Enter
    terminal.pump(&mut ScriptedScancodes::new(&[0x21, 0x18, 0x18, 0x1C]), &mut console);

    assert_eq!(row_text(&console, 0), "konsoli> foo");
    assert_eq!(
        row_text(&console, 1),
        "Unknown command: foo (type 'help' for commands)"
    );
    assert_eq!(row_text(&console, 2), "konsoli>");
}

#[test]
fn test_session_scrolls_past_bottom() {
    let mut console = Console::new(MemoryBuffer::<40, 4>::new());
    let mut terminal = Terminal::with_commands(&BUILTIN_COMMANDS, bare());
    // h e l l o Enter, three times
    let hello = [0x23, 0x12, 0x26, 0x26, 0x18, 0x1C];
    for _ in 0..3 {
        terminal.pump(&mut ScriptedScancodes::new(&hello), &mut console);
    }

    assert_eq!(row_text(&console, 0), "Hello, User!");
    assert_eq!(row_text(&console, 1), "hello");
    assert_eq!(row_text(&console, 2), "Hello, User!");
    assert_eq!(row_text(&console, 3), "");
}

#[test]
fn test_pause_leaves_keypad_digits() {
    let mut console = Console::new(MemoryBuffer::<80, 25>::new());
    let mut terminal = Terminal::with_commands(&SHOUT_TABLE, bare());
    let mut bytes = vec![keymap::HOME];
    bytes.extend_from_slice(&[keymap::PAUSE_PREFIX, 0x1D, 0x45, keymap::PAUSE_PREFIX, 0x9D, 0xC5]);
    bytes.push(keymap::HOME);
    terminal.pump(&mut ScriptedScancodes::new(&bytes), &mut console);

    assert_eq!(terminal.input(), "77");
    assert!(terminal.modifiers().num_lock());
    assert!(!terminal.modifiers().ctrl());
}

#[test]
fn test_f2_wipes_earlier_output() {
    let mut console = Console::new(MemoryBuffer::<80, 25>::new());
    let mut terminal = Terminal::new();
    terminal.prompt(&mut console);
    // h e l l o Enter, then F2
    terminal.pump(
        &mut ScriptedScancodes::new(&[0x23, 0x12, 0x26, 0x26, 0x18, 0x1C, keymap::F1 + 1]),
        &mut console,
    );

    assert_eq!(row_text(&console, 0), "konsoli>");
    assert_eq!(row_text(&console, 1), "");
    assert_eq!(console.cursor(), (9, 0));
}

struct FakePort {
    pending: VecDeque<u8>,
}

impl KeyboardPort for FakePort {
    fn status(&mut self) -> u8 {
        u8::from(!self.pending.is_empty())
    }

    fn read_data(&mut self) -> u8 {
        self.pending.pop_front().unwrap_or(0)
    }
}

#[test]
fn test_polled_port_debounces_repeats() {
    let mut console = Console::new(MemoryBuffer::<80, 25>::new());
    let mut terminal = Terminal::with_commands(&SHOUT_TABLE, bare());
    let port = FakePort {
        pending: VecDeque::from(vec![0x1E, 0x1E, 0x9E, 0x1E]),
    };
    let mut keyboard = PolledKeyboard::new(port);

    // The repeated byte reads as "no key", so poll until the port is empty.
    while !keyboard.port().pending.is_empty() {
        terminal.pump(&mut keyboard, &mut console);
    }

    assert_eq!(terminal.input(), "aa");
}

#[test]
fn test_queue_feeds_terminal() {
    let mut console = Console::new(MemoryBuffer::<80, 25>::new());
    let mut terminal = Terminal::with_commands(&SHOUT_TABLE, bare());
    let queue = ScancodeQueue::new(8);
    for byte in [0x1E, 0x9E, 0x1C] {
        queue.push(byte);
    }

    let processed = terminal.pump(&mut &queue, &mut console);

    assert_eq!(processed, 3);
    assert_eq!(row_text(&console, 1), "A!");
    assert_eq!(queue.pop(), None);
}
