//! Shortens Azure resource ids into readable node keys.
//!
//! `/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet1/subnets/default`
//! has the name segments `s, rg, vnet1, default`. Its key is the shortest
//! trailing run of those segments that no other registered id shares,
//! e.g. `vnet1/default` when another virtual network also has a `default`
//! subnet.

use labyrinth_core::types::FxHashMap;

#[derive(Debug, Default)]
pub struct NameShortener {
    /// Lowercased id → name segments, in registration order.
    ids: Vec<(String, Vec<String>)>,
    shortened: FxHashMap<String, String>,
}

impl NameShortener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an id. Ids compare case-insensitively; repeats are ignored.
    pub fn add(&mut self, id: &str) {
        let lower = id.to_ascii_lowercase();
        if self.ids.iter().any(|(known, _)| *known == lower) {
            return;
        }
        self.ids.push((lower, name_segments(id)));
        self.shortened.clear();
    }

    /// Compute keys for every registered id.
    pub fn finish(&mut self) {
        let mut shortened = FxHashMap::default();
        for (lower, segments) in &self.ids {
            let key = (1..=segments.len())
                .map(|k| &segments[segments.len() - k..])
                .find(|suffix| self.sharing(suffix) == 1)
                .map(|suffix| suffix.join("/"))
                .unwrap_or_else(|| lower.clone());
            shortened.insert(lower.clone(), key);
        }
        self.shortened = shortened;
    }

    /// Key for `id`, or `None` if it was never registered.
    pub fn shorten(&self, id: &str) -> Option<&str> {
        self.shortened
            .get(&id.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn sharing(&self, suffix: &[String]) -> usize {
        self.ids
            .iter()
            .filter(|(_, segments)| {
                segments.len() >= suffix.len()
                    && segments[segments.len() - suffix.len()..]
                        .iter()
                        .zip(suffix)
                        .all(|(a, b)| a.eq_ignore_ascii_case(b))
            })
            .count()
    }
}

/// Subscription, resource group and resource names of an id, without the
/// fixed words and resource type segments between them.
fn name_segments(id: &str) -> Vec<String> {
    let parts: Vec<&str> = id.split('/').filter(|p| !p.is_empty()).collect();
    let mut names = Vec::new();
    let mut i = 0;
    while i < parts.len() {
        let part = parts[i];
        if part.eq_ignore_ascii_case("subscriptions") || part.eq_ignore_ascii_case("resourceGroups") {
            if let Some(name) = parts.get(i + 1) {
                names.push((*name).to_string());
            }
            i += 2;
        } else if part.eq_ignore_ascii_case("providers") {
            // Skip the namespace, then alternate type/name.
            i += 2;
            while i + 1 < parts.len() {
                names.push(parts[i + 1].to_string());
                i += 2;
            }
        } else {
            names.push(part.to_string());
            i += 1;
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const VNET1: &str = "/subscriptions/s1/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet1";
    const VNET2: &str = "/subscriptions/s1/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet2";

    #[test]
    fn test_name_segments() {
        assert_eq!(
            name_segments(&format!("{VNET1}/subnets/default")),
            vec!["s1", "rg", "vnet1", "default"]
        );
    }

    #[test]
    fn test_shortest_unique_suffix() {
        let mut shortener = NameShortener::new();
        for id in [
            VNET1.to_string(),
            format!("{VNET1}/subnets/default"),
            VNET2.to_string(),
            format!("{VNET2}/subnets/default"),
            format!("{VNET2}/subnets/backend"),
        ] {
            shortener.add(&id);
        }
        shortener.finish();

        assert_eq!(shortener.shorten(VNET1), Some("vnet1"));
        assert_eq!(shortener.shorten(&format!("{VNET1}/subnets/default")), Some("vnet1/default"));
        assert_eq!(shortener.shorten(&format!("{VNET2}/subnets/backend")), Some("backend"));
        assert_eq!(shortener.shorten("/nope"), None);
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut shortener = NameShortener::new();
        shortener.add(VNET1);
        shortener.add(&VNET1.to_uppercase());
        shortener.finish();
        assert_eq!(shortener.shorten(&VNET1.to_lowercase()), Some("vnet1"));
    }

    #[test]
    fn test_suffix_of_longer_id_is_not_unique() {
        let mut shortener = NameShortener::new();
        // A vnet named `default` and a subnet named `default`.
        shortener.add("/subscriptions/s1/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/default");
        shortener.add(&format!("{VNET1}/subnets/default"));
        shortener.finish();
        assert_eq!(
            shortener.shorten("/subscriptions/s1/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/default"),
            Some("rg/default")
        );
        assert_eq!(shortener.shorten(&format!("{VNET1}/subnets/default")), Some("vnet1/default"));
    }
}
