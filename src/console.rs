use core::fmt::{self, Write};
use spin::Mutex;

/// Byte sink the console forwards formatted text to (a UART, a semihosting
/// channel, a test buffer...).
pub trait ConsoleSink: Sync {
    fn putstr(&self, s: &str);
}

pub struct Console(Option<&'static dyn ConsoleSink>);

pub static CONSOLE: Mutex<Console> = Mutex::new(Console(None));

impl Write for Console {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Some(sink) = self.0 {
            sink.putstr(s);
        }
        Ok(())
    }
}

/// Route console output to `sink`. Output produced before this is dropped.
pub fn set_sink(sink: &'static dyn ConsoleSink) {
    CONSOLE.lock().0 = Some(sink);
}

pub fn print(args: fmt::Arguments) {
    let mut console = CONSOLE.lock();
    // Console::write_str never fails
    let _ = console.write_fmt(args);
    drop(console);
}

#[macro_export]
macro_rules! print {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print(format_args!($fmt $(, $($arg)+)?))
    }
}

#[macro_export]
macro_rules! println {
    ($fmt: literal $(, $($arg: tt)+)?) => {
        $crate::console::print(format_args!(concat!($fmt, "\n") $(, $($arg)+)?))
    }
}
