use embedded_hal::blocking::delay::DelayUs;

const USEC_PER_SEC: u64 = 1_000_000;

/// Free-running counter with a known, fixed frequency (a `mtime`/`time` CSR,
/// a SysTick reload counter extended in software...).
pub trait TickSource {
    /// Ticks since reset. Must be monotonic.
    fn get_time(&self) -> u64;
    fn clock_freq(&self) -> u64;
}

/// Busy-wait delay that spins on a [`TickSource`].
///
/// This is the delay primitive handed to [`SpiContext`](crate::SpiContext)
/// for chip-select setup/hold timing. It never yields.
pub struct BusyDelay<T: TickSource> {
    clock: T,
}

impl<T: TickSource> BusyDelay<T> {
    pub fn new(clock: T) -> Self {
        Self { clock }
    }

    pub fn get_time_us(&self) -> u64 {
        ticks_to_us(self.clock.get_time(), self.clock.clock_freq())
    }

    pub fn release(self) -> T {
        self.clock
    }
}

impl<T: TickSource> DelayUs<u32> for BusyDelay<T> {
    fn delay_us(&mut self, us: u32) {
        if us == 0 {
            return;
        }
        let ticks = us_to_ticks(us, self.clock.clock_freq());
        let start = self.clock.get_time();
        while self.clock.get_time().wrapping_sub(start) < ticks {
            core::hint::spin_loop();
        }
    }
}

/// Ticks covering at least `us`, rounded up.
fn us_to_ticks(us: u32, freq: u64) -> u64 {
    let usec = u128::from(USEC_PER_SEC);
    let ticks = (u128::from(us) * u128::from(freq) + usec - 1) / usec;
    ticks.min(u128::from(u64::MAX)) as u64
}

fn ticks_to_us(ticks: u64, freq: u64) -> u64 {
    (u128::from(ticks) * u128::from(USEC_PER_SEC) / u128::from(freq)) as u64
}
