//! Konsoli Kernel Entry Point
//!
//! On bare metal this is the bootloader entry point. On a hosted target it is a
//! simulator that replays a scripted keyboard session into an in-memory screen
//! and prints the result.

#![cfg_attr(target_os = "none", no_std, no_main)]

#[cfg(target_os = "none")]
mod kernel {
    use bootloader::{entry_point, BootInfo};
    use core::panic::PanicInfo;
    #[cfg(not(feature = "irq-keyboard"))]
    use konsoli_kernel::arch::x86_64::Ps2Port;
    use konsoli_kernel::arch::x86_64::{self, vga};
    use konsoli_kernel::boot::{self, banner, Status};
    use konsoli_kernel::delay::SpinDelay;
    #[cfg(not(feature = "irq-keyboard"))]
    use konsoli_kernel::keyboard::PolledKeyboard;
    #[cfg(feature = "irq-keyboard")]
    use konsoli_kernel::keyboard::ScancodeQueue;
    use konsoli_kernel::serial_println;
    use konsoli_kernel::terminal::Terminal;
    #[cfg(not(feature = "irq-keyboard"))]
    use konsoli_kernel::config;
    #[cfg(not(feature = "irq-keyboard"))]
    use konsoli_hal::Delay;

    entry_point!(kernel_main);

    /// Kernel entry point.
    ///
    /// Called by the bootloader after setting up the initial environment.
    fn kernel_main(_boot_info: &'static BootInfo) -> ! {
        // ====================================================================
        // Phase 1: Core Initialization
        // ====================================================================
        konsoli_kernel::init();

        // ====================================================================
        // Phase 2: Banner and Boot Logging
        // ====================================================================
        {
            let mut console = vga::console().lock();
            console.init();
            banner::print_banner(&mut *console, &mut SpinDelay::new());
            boot::log(&mut *console, Status::Ok, "Serial port initialized");
            boot::log(&mut *console, Status::Ok, "VGA console ready");
            boot::log(&mut *console, Status::Ok, "IDT configured");

            boot::log_start(&mut *console, "Running kernel tests");
            let summary = konsoli_kernel::tests::run_all();
            boot::log_end(
                &mut *console,
                if summary.all_passed() {
                    Status::Ok
                } else {
                    Status::Fail
                },
            );
        }

        // ====================================================================
        // Phase 3: Input
        // ====================================================================
        let mut source = input_source();

        // ====================================================================
        // Boot Complete
        // ====================================================================
        let mut terminal = Terminal::new();
        {
            let mut console = vga::console().lock();
            boot::log(&mut *console, Status::Ok, "Boot complete!");
            console.write("\n Type 'help' for available commands. F2 clears the screen.\n\n");
            terminal.prompt(&mut *console);
        }

        let mut idle = Idle::new();
        loop {
            {
                let mut console = vga::console().lock();
                terminal.pump(&mut source, &mut *console);
            }
            idle.wait(&source);
        }
    }

    #[cfg(not(feature = "irq-keyboard"))]
    fn input_source() -> PolledKeyboard<Ps2Port> {
        let mut console = vga::console().lock();
        boot::log(&mut *console, Status::Info, "Keyboard: polling PS/2 controller");
        PolledKeyboard::new(Ps2Port::new())
    }

    #[cfg(feature = "irq-keyboard")]
    fn input_source() -> &'static ScancodeQueue {
        x86_64::interrupts::enable_keyboard_irq();
        let mut console = vga::console().lock();
        boot::log(&mut *console, Status::Info, "Keyboard: IRQ1 via scancode queue");
        konsoli_kernel::keyboard::queue::init()
    }

    /// What the main loop does between pumps.
    struct Idle {
        #[cfg(not(feature = "irq-keyboard"))]
        delay: SpinDelay,
        #[cfg(feature = "irq-keyboard")]
        reported_drops: usize,
    }

    impl Idle {
        fn new() -> Self {
            Idle {
                #[cfg(not(feature = "irq-keyboard"))]
                delay: SpinDelay::new(),
                #[cfg(feature = "irq-keyboard")]
                reported_drops: 0,
            }
        }

        /// Waits one poll interval.
        #[cfg(not(feature = "irq-keyboard"))]
        fn wait(&mut self, _source: &PolledKeyboard<Ps2Port>) {
            self.delay.wait(config::POLL_INTERVAL);
        }

        /// Reports overflow, then sleeps until IRQ1 unless bytes are queued.
        #[cfg(feature = "irq-keyboard")]
        fn wait(&mut self, queue: &&'static ScancodeQueue) {
            queue.report_drops(&mut self.reported_drops);
            x86_64::sleep_unless(|| !queue.is_empty());
        }
    }

    /// Panic handler.
    ///
    /// Called when the kernel encounters an unrecoverable error.
    #[panic_handler]
    fn panic(info: &PanicInfo) -> ! {
        serial_println!("KERNEL PANIC: {}", info);

        if let Some(console) = vga::CONSOLE.get() {
            if let Some(mut console) = console.try_lock() {
                banner::print_panic(&mut *console, info);
            }
        }

        x86_64::halt_loop()
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    use konsoli_kernel::delay::NoDelay;
    use konsoli_kernel::keyboard::{keymap, ScriptedScancodes};
    use konsoli_kernel::{boot, Console, MemoryBuffer, Terminal};

    const SESSION: &[u8] = &[
        // h e l l o Enter
        0x23, 0xA3, 0x12, 0x92, 0x26, 0xA6, 0x26, 0xA6, 0x18, 0x98, keymap::ENTER,
        // Shift held for the first letter: I n f o
        keymap::LEFT_SHIFT, 0x17, keymap::LEFT_SHIFT | keymap::BREAK_BIT, 0x31, 0x21, 0x18,
        // erase it, retype in lower case, Enter
        keymap::BACKSPACE, keymap::BACKSPACE, keymap::BACKSPACE, keymap::BACKSPACE,
        0x17, 0x31, 0x21, 0x18, keymap::ENTER,
        // arrow up, F1, then a Pause press that changes nothing
        keymap::EXTENDED_PREFIX, keymap::UP, keymap::F1,
        keymap::PAUSE_PREFIX, 0x1D, 0x45, keymap::PAUSE_PREFIX, 0x9D, 0xC5,
    ];

    let mut console = Console::new(MemoryBuffer::<80, 25>::new());
    boot::banner::print_banner(&mut console, &mut NoDelay);
    boot::log(&mut console, boot::Status::Info, "Keyboard: scripted session");
    console.put_char('\n');

    let mut terminal = Terminal::new();
    terminal.prompt(&mut console);
    let mut source = ScriptedScancodes::new(SESSION);
    let processed = terminal.pump(&mut source, &mut console);

    let screen = console.framebuffer().buffer();
    for y in 0..console.height() {
        let row = screen.row_chars(y);
        println!("{}", String::from_utf8_lossy(&row).trim_end());
    }
    println!("-- {} scancodes replayed --", processed);
}
