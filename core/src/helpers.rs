// Copyright (c) 2026 The pintan Developers

use alloc::{string::String, vec::Vec};

/// Find the next `+`, `:` or `'` delimiter at or after `pos`,
/// skipping `?` escapes and `@len@` binary blocks
fn next_delimiter(msg: &[u8], mut pos: usize) -> usize {
    while pos < msg.len() {
        match msg[pos] {
            b'?' => pos += 2,
            b'@' => {
                // Binary data is prefixed with its length, `@12@...`
                let header = msg[pos + 1..]
                    .iter()
                    .position(|c| *c == b'@')
                    .and_then(|end| {
                        let digits = core::str::from_utf8(&msg[pos + 1..pos + 1 + end]).ok()?;
                        digits.parse::<usize>().ok().map(|n| (end, n))
                    });

                match header {
                    Some((end, n)) => pos = pos.saturating_add(end + 2).saturating_add(n),
                    None => pos += 1,
                }
            }
            b'+' | b':' | b'\'' => return pos,
            _ => pos += 1,
        }
    }

    msg.len()
}

/// Collect the segment codes of an encoded message, in order
pub fn collect_segment_codes(msg: &[u8]) -> Vec<String> {
    let mut codes = Vec::new();
    let mut pos = 0;

    while pos < msg.len() {
        // Segment code precedes the first `:` of each segment header
        let end = match msg[pos..].iter().position(|c| *c == b':') {
            Some(n) => pos + n,
            None => break,
        };
        codes.push(String::from_utf8_lossy(&msg[pos..end]).into_owned());

        // Skip to the segment terminator
        while pos < msg.len() && msg[pos] != b'\'' {
            pos = next_delimiter(msg, pos + 1);
        }
        pos += 1;
    }

    codes
}
