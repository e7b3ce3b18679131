//! Protocol literals: well-known names or protocol numbers.

use labyrinth_core::constants::{MAX_PROTOCOL, PROTOCOL_NAMES};
use labyrinth_core::errors::RangeError;

use super::interval_set::{Interval, IntervalSet};

pub(crate) fn parse_item(item: &str) -> Result<IntervalSet, RangeError> {
    let (start, end) = match item.split_once('-') {
        Some((low, high)) => (parse_protocol(low, item)?, parse_protocol(high, item)?),
        None => {
            let protocol = parse_protocol(item, item)?;
            (protocol, protocol)
        }
    };
    if start > end {
        return Err(RangeError::InvertedRange {
            text: item.to_string(),
        });
    }
    Ok(IntervalSet::from_interval(Interval::new(start, end)))
}

fn parse_protocol(text: &str, item: &str) -> Result<u32, RangeError> {
    let text = text.trim();
    if let Some((number, _)) = PROTOCOL_NAMES
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(text))
    {
        return Ok(*number);
    }
    text.parse::<u32>()
        .ok()
        .filter(|n| *n <= MAX_PROTOCOL)
        .ok_or_else(|| RangeError::InvalidProtocol {
            text: item.to_string(),
        })
}

fn protocol_name(number: u32) -> String {
    PROTOCOL_NAMES
        .iter()
        .find(|(n, _)| *n == number)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| number.to_string())
}

pub(crate) fn format_items(set: &IntervalSet) -> Vec<String> {
    set.intervals()
        .iter()
        .map(|iv| {
            if iv.start == iv.end {
                protocol_name(iv.start)
            } else {
                format!("{}-{}", protocol_name(iv.start), protocol_name(iv.end))
            }
        })
        .collect()
}
