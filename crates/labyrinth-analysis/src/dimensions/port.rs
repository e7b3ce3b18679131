//! Port literals: `n` or `n-m`.

use labyrinth_core::constants::MAX_PORT;
use labyrinth_core::errors::RangeError;

use super::interval_set::{Interval, IntervalSet};

pub(crate) fn parse_item(item: &str) -> Result<IntervalSet, RangeError> {
    let (start, end) = match item.split_once('-') {
        Some((low, high)) => (parse_port(low, item)?, parse_port(high, item)?),
        None => {
            let port = parse_port(item, item)?;
            (port, port)
        }
    };
    if start > end {
        return Err(RangeError::InvertedRange {
            text: item.to_string(),
        });
    }
    Ok(IntervalSet::from_interval(Interval::new(start, end)))
}

fn parse_port(text: &str, item: &str) -> Result<u32, RangeError> {
    text.trim()
        .parse::<u32>()
        .ok()
        .filter(|port| *port <= MAX_PORT)
        .ok_or_else(|| RangeError::InvalidPort {
            text: item.to_string(),
        })
}

pub(crate) fn format_items(set: &IntervalSet) -> Vec<String> {
    set.intervals().iter().map(Interval::to_string).collect()
}
