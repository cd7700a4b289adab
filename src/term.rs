//! Frame encoding onto a serial byte channel.
//!
//! A framebuffer is streamed as ANSI escape sequences plus one space byte per
//! cell; the space picks up the background color selected by the most recent
//! color sequence, so the terminal shows a grid of solid blocks. The stream
//! always begins with a cursor-home sequence, which makes consecutive frames
//! overwrite each other in place instead of scrolling.

use crate::color::TermColor;
use crate::framebuffer::Framebuffer;

/// Byte transmit channel with busy and space signaling.
///
/// The encoder spin-polls both signals with no timeout: a channel that never
/// drains stalls the caller forever. That is the intended contract on the
/// embedded targets this crate is written for, where the render loop has
/// nothing else to do.
pub trait SerialTx {
    /// True while previously queued bytes are still being shifted out.
    fn is_transmitting(&self) -> bool;
    /// True when the channel can accept one more byte.
    fn has_space(&self) -> bool;
    /// Queues one byte for transmission.
    fn transmit(&mut self, byte: u8);
}

const ESC: u8 = 0x1b;

/// Streams a framebuffer to the terminal as colored blocks.
///
/// Blocks until the previous frame has finished transmitting, homes the
/// cursor, then emits cells row-major with a CR LF pair between rows. A color
/// select sequence goes out only when a cell differs from the last color
/// sent; the tracked color starts out unset on every call, so the first cell
/// always selects.
pub fn display_frame<T: SerialTx>(port: &mut T, frame: &Framebuffer) {
    // One frame in flight at a time.
    while port.is_transmitting() {}

    move_cursor(port, 0, 0);

    let width = frame.width();
    let mut current: Option<TermColor> = None;
    for (i, &cell) in frame.cells().iter().enumerate() {
        if i > 0 && i % width == 0 {
            send(port, b'\r');
            send(port, b'\n');
        }
        if current != Some(cell) {
            current = Some(cell);
            select_color(port, cell);
        }
        send(port, b' ');
    }

    log::trace!("streamed {}x{} cell frame", width, frame.height());
}

/// `ESC [ row ; col H` from zero-based cell coordinates.
fn move_cursor<T: SerialTx>(port: &mut T, column: u8, row: u8) {
    send(port, ESC);
    send(port, b'[');
    send_decimal(port, row + 1);
    send(port, b';');
    send_decimal(port, column + 1);
    send(port, b'H');
}

/// `ESC [ code m`.
fn select_color<T: SerialTx>(port: &mut T, color: TermColor) {
    send(port, ESC);
    send(port, b'[');
    send_decimal(port, color.code());
    send(port, b'm');
}

/// Decimal digits without leading zeros. Zero itself emits nothing; every
/// value the frame protocol sends is nonzero.
fn send_decimal<T: SerialTx>(port: &mut T, value: u8) {
    let mut emitted = false;

    let hundreds = (value / 100) % 10;
    if hundreds > 0 {
        emitted = true;
        send(port, b'0' + hundreds);
    }

    let tens = (value / 10) % 10;
    if tens > 0 || emitted {
        emitted = true;
        send(port, b'0' + tens);
    }

    let ones = value % 10;
    if ones > 0 || emitted {
        send(port, b'0' + ones);
    }
}

fn send<T: SerialTx>(port: &mut T, byte: u8) {
    while !port.has_space() {}
    port.transmit(byte);
}
