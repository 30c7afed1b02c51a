//! stderr sink for `env_logger` that can be held while a popup owns the
//! terminal. Held lines are written out, in order, on release.
#![cfg_attr(not(feature = "tui"), allow(dead_code))]

use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

static GATE: Mutex<Gate> = Mutex::new(Gate::new());

#[derive(Debug)]
struct Gate {
    held: bool,
    pending: Vec<u8>,
}

impl Gate {
    const fn new() -> Self {
        Self {
            held: false,
            pending: Vec::new(),
        }
    }

    fn write_to(&mut self, buf: &[u8], sink: &mut impl Write) -> io::Result<()> {
        if self.held {
            self.pending.extend_from_slice(buf);
            Ok(())
        } else {
            sink.write_all(buf)
        }
    }

    fn release_to(&mut self, sink: &mut impl Write) -> io::Result<()> {
        self.held = false;
        let pending = std::mem::take(&mut self.pending);
        sink.write_all(&pending)?;
        sink.flush()
    }
}

fn gate() -> MutexGuard<'static, Gate> {
    GATE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Log target installed in `main`.
pub struct GatedStderr;

impl Write for GatedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        gate().write_to(buf, &mut io::stderr())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Hold log output until the guard is dropped.
pub fn hold() -> HoldGuard {
    gate().held = true;
    HoldGuard { _private: () }
}

pub struct HoldGuard {
    _private: (),
}

impl Drop for HoldGuard {
    fn drop(&mut self) {
        let _ = gate().release_to(&mut io::stderr());
    }
}
