//! IPv4 address literals and CIDR display.

use std::net::Ipv4Addr;

use labyrinth_core::errors::RangeError;

use super::interval_set::{Interval, IntervalSet};

/// Parse `a.b.c.d`, `a.b.c.d/len` or `a.b.c.d-e.f.g.h`.
/// Host bits of a prefix are masked off (`10.1.2.3/8` is `10.0.0.0/8`).
pub(crate) fn parse_item(item: &str) -> Result<IntervalSet, RangeError> {
    if let Some((low, high)) = item.split_once('-') {
        let start = parse_address(low.trim())?;
        let end = parse_address(high.trim())?;
        if start > end {
            return Err(RangeError::InvertedRange {
                text: item.to_string(),
            });
        }
        return Ok(IntervalSet::from_interval(Interval::new(start, end)));
    }

    if let Some((address, length)) = item.split_once('/') {
        let base = parse_address(address.trim())?;
        let length: u32 = length
            .trim()
            .parse()
            .ok()
            .filter(|len| *len <= 32)
            .ok_or_else(|| RangeError::InvalidPrefix {
                text: item.to_string(),
            })?;
        let mask = if length == 0 { 0 } else { u32::MAX << (32 - length) };
        let start = base & mask;
        return Ok(IntervalSet::from_interval(Interval::new(start, start | !mask)));
    }

    Ok(IntervalSet::single(parse_address(item)?))
}

fn parse_address(text: &str) -> Result<u32, RangeError> {
    text.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| RangeError::InvalidAddress {
            text: text.to_string(),
        })
}

/// Decompose an interval into the minimal list of aligned CIDR blocks,
/// returned as `(network, prefix length)`.
pub fn cidr_blocks(interval: Interval) -> Vec<(u32, u32)> {
    let mut blocks = Vec::new();
    let end = u64::from(interval.end);
    let mut start = u64::from(interval.start);
    while start <= end {
        // Largest block aligned at `start`.
        let mut size: u64 = if start == 0 {
            1 << 32
        } else {
            1 << start.trailing_zeros()
        };
        while start + size - 1 > end {
            size >>= 1;
        }
        blocks.push((start as u32, 32 - size.trailing_zeros()));
        start += size;
    }
    blocks
}

pub(crate) fn format_block(network: u32, length: u32) -> String {
    let address = Ipv4Addr::from(network);
    if length == 32 {
        address.to_string()
    } else {
        format!("{address}/{length}")
    }
}

pub(crate) fn format_items(set: &IntervalSet) -> Vec<String> {
    set.intervals()
        .iter()
        .flat_map(|iv| cidr_blocks(*iv))
        .map(|(network, length)| format_block(network, length))
        .collect()
}
