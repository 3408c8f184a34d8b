//! Sliding-window decoder.
//!
//! The stream is a sequence of groups: one control byte followed by up to
//! eight items. Control bits are consumed LSB first; a set bit is a literal
//! byte, a clear bit is a two-byte back-reference into the last 4096 bytes
//! of output.
//!
//! Back-reference layout (`lo`, `hi` as read):
//!
//! ```text
//! hi: LLLL OOOO   lo: oooo oooo
//! offset = OOOO oooo oooo   (window position, 12 bits)
//! length = LLLL + 3         (3..=18)
//! ```
//!
//! Window positions are absolute ring-buffer slots where the first output
//! byte lands in slot `0xFEE`. Rather than keep a separate ring, the output
//! buffer carries a zeroed 4096-byte history prefix so every slot maps to a
//! real index.

/// Ring buffer size
pub const WINDOW_SIZE: usize = 0x1000;

/// Ring slot of the first output byte
pub const WINDOW_START: usize = 0xFEE;

pub const MIN_MATCH: usize = 3;
pub const MAX_MATCH: usize = 18;

const WINDOW_MASK: usize = WINDOW_SIZE - 1;

/// Decode `input` (the stream after the header) into exactly
/// `uncompressed_size` bytes.
///
/// Trailing partial groups are tolerated. Output past `uncompressed_size`
/// is dropped; output that falls short leaves zeros.
pub(crate) fn decode(input: &[u8], uncompressed_size: usize) -> Vec<u8> {
    let mut out = vec![0u8; WINDOW_SIZE + uncompressed_size];
    let end = out.len();
    let mut ip = 0;
    let mut op = WINDOW_SIZE;

    'groups: while ip < input.len() {
        let mut flags = u32::from(input[ip]) | 0x100;
        ip += 1;

        while flags != 1 {
            if flags & 1 != 0 {
                let Some(&byte) = input.get(ip) else {
                    break;
                };
                if op >= end {
                    break 'groups;
                }
                out[op] = byte;
                ip += 1;
                op += 1;
            } else {
                if ip + 2 > input.len() {
                    break;
                }
                let param = usize::from(input[ip]) | (usize::from(input[ip + 1]) << 8);
                ip += 2;

                let (offset, length) = split_param(param);
                let delta = window_distance(op, offset);
                let src = op - delta;

                // Source and destination overlap whenever delta < length;
                // each byte must see the ones written just before it
                for n in 0..length {
                    if op + n >= end {
                        break 'groups;
                    }
                    out[op + n] = out[src + n];
                }
                op += length;
            }

            flags >>= 1;
        }
    }

    out.split_off(WINDOW_SIZE)
}

/// `(window offset, match length)` of a back-reference parameter
fn split_param(param: usize) -> (usize, usize) {
    let offset = (param & 0xFF) | ((param >> 4) & 0xF00);
    let length = ((param >> 8) & 0xF) + MIN_MATCH;
    (offset, length)
}

/// Backward distance from output index `op` to the byte in ring slot `offset`.
/// Always in `0..WINDOW_SIZE`, so `op - distance` never leaves the history prefix.
fn window_distance(op: usize, offset: usize) -> usize {
    let current = (WINDOW_START + op) & WINDOW_MASK;
    (current + WINDOW_SIZE - offset) & WINDOW_MASK
}
