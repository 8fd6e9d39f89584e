//! Parsing of the `Sec-Ch-Ua-*` Client-Hints headers (§3, §4.5) into
//! high-confidence [`Proposal`]s that override plain UA-string matches.
//!
//! Client-Hints proposals live in their own confidence band, strictly above
//! anything a UA-string matcher emits, so the ordinary resolver tie-break
//! (§4.4) is what makes "Client Hints override the UA string" true — no
//! special-cased merge logic is needed.

use std::collections::BTreeMap;

use engine::Proposal;
use rules::Field;

/// Confidence band for Client-Hints proposals. Chosen well above the largest
/// confidence any builtin UA-string matcher declares (20), so a present
/// Client-Hints header always wins, while an absent/empty one falls back to
/// the UA-string proposal.
const BASE_CONFIDENCE: u32 = 500;

/// The only header names that influence a proposal or the cache key (§3,
/// §4.6): `User-Agent` plus every `Sec-Ch-Ua-*` Client-Hints header this
/// crate reads. An unrecognized header is accepted by [`ClientHints::from_headers`]
/// but must not perturb [`ClientHints::cache_key`].
const RECOGNIZED_HEADERS: &[&str] = &[
    "user-agent",
    "sec-ch-ua",
    "sec-ch-ua-arch",
    "sec-ch-ua-bitness",
    "sec-ch-ua-full-version",
    "sec-ch-ua-full-version-list",
    "sec-ch-ua-mobile",
    "sec-ch-ua-model",
    "sec-ch-ua-platform",
    "sec-ch-ua-platform-version",
    "sec-ch-ua-wow64",
];

/// A case-insensitive, order-preserving view over the recognized
/// `User-Agent`/`Sec-Ch-Ua-*` headers. Unknown headers are accepted and
/// ignored, per §3.
#[derive(Debug, Clone, Default)]
pub struct ClientHints {
    headers: BTreeMap<String, String>,
}

impl ClientHints {
    /// Builds a view from an arbitrary header iterator. Header names are
    /// lower-cased for lookup; values are kept as given.
    pub fn from_headers<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (key, value) in headers {
            map.insert(key.into().to_ascii_lowercase(), value.into());
        }
        Self { headers: map }
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.headers.get("user-agent").map(String::as_str)
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .map(|v| trim_structured_quotes(v))
            .filter(|v| !v.is_empty())
    }

    /// A stable cache key: the sorted `header=value` concatenation the
    /// parse-cache contract (§4.6) calls for, restricted to the recognized
    /// header subset so an unrelated header riding along in the map can't
    /// split otherwise-identical requests into separate cache entries.
    pub fn cache_key(&self) -> String {
        self.headers
            .iter()
            .filter(|(k, _)| RECOGNIZED_HEADERS.contains(&k.as_str()))
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Emits one high-confidence proposal per recognized, non-empty header.
    /// Brand lists (`Sec-Ch-Ua`, `Sec-Ch-Ua-Full-Version-List`) are parsed
    /// best-effort; a malformed list simply yields no proposal from that
    /// header rather than failing the whole parse (parse is total, §7).
    pub fn proposals(&self) -> Vec<Proposal> {
        let mut out = Vec::new();
        let mut push = |field: Field, value: Option<&str>, confidence: u32| {
            if let Some(value) = value {
                out.push(Proposal::new(field, value, confidence, u32::MAX));
            }
        };

        push(Field::OperatingSystemName, self.get("sec-ch-ua-platform"), BASE_CONFIDENCE);
        push(
            Field::OperatingSystemVersion,
            self.get("sec-ch-ua-platform-version"),
            BASE_CONFIDENCE,
        );
        push(Field::DeviceCpuBits, self.get("sec-ch-ua-bitness"), BASE_CONFIDENCE);
        push(Field::DeviceName, self.get("sec-ch-ua-model"), BASE_CONFIDENCE);
        push(Field::DeviceCpu, self.get("sec-ch-ua-arch"), BASE_CONFIDENCE);

        // Wow64 means a 32-bit browser process is running under emulation on
        // a 64-bit Windows kernel, so a concurrent `Sec-Ch-Ua-Arch: "x86"`
        // understates the real CPU. Prefer it over a plain arch proposal.
        if let Some("?1") = self.get("sec-ch-ua-wow64") {
            out.push(Proposal::new(Field::DeviceCpu, "amd64", BASE_CONFIDENCE + 1, u32::MAX));
        }

        if let Some(mobile) = self.get("sec-ch-ua-mobile") {
            if mobile == "?1" {
                out.push(Proposal::new(Field::DeviceClass, "Mobile", BASE_CONFIDENCE, u32::MAX));
            }
        }

        if let Some((name, version)) = self.get("sec-ch-ua").and_then(|v| first_real_brand(v)) {
            out.push(Proposal::new(Field::AgentName, name, BASE_CONFIDENCE, u32::MAX));
            out.push(Proposal::new(Field::AgentVersion, version, BASE_CONFIDENCE, u32::MAX));
        }

        push(Field::AgentVersion, self.get("sec-ch-ua-full-version"), BASE_CONFIDENCE + 1);

        if let Some((name, version)) = self
            .get("sec-ch-ua-full-version-list")
            .and_then(|v| first_real_brand(v))
        {
            out.push(Proposal::new(Field::AgentName, name, BASE_CONFIDENCE + 2, u32::MAX));
            out.push(Proposal::new(Field::AgentVersion, version, BASE_CONFIDENCE + 2, u32::MAX));
        }

        out
    }
}

fn trim_structured_quotes(value: &str) -> &str {
    value.trim().trim_matches('"')
}

/// Parses a Structured-Fields-ish brand list: `"Brand";v="Version", ...`,
/// skipping the greasy `"Not.A/Brand"`-shaped sentinel entries Chromium
/// injects to discourage UA sniffing, and returns the first real brand.
fn first_real_brand(list: &str) -> Option<(String, String)> {
    for entry in list.split(',') {
        let entry = entry.trim();
        let (brand_part, version_part) = entry.split_once(';')?;
        let brand = trim_structured_quotes(brand_part).to_string();
        if brand.to_ascii_lowercase().contains("not") {
            continue;
        }
        let version = version_part
            .trim()
            .strip_prefix("v=")
            .map(trim_structured_quotes)
            .unwrap_or("")
            .to_string();
        if brand.is_empty() || version.is_empty() {
            continue;
        }
        return Some((brand, version));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_header_value_yields_no_proposal() {
        let hints = ClientHints::from_headers([("Sec-Ch-Ua-Platform", "")]);
        assert!(hints.proposals().is_empty());
    }

    #[test]
    fn platform_header_becomes_os_name_proposal() {
        let hints = ClientHints::from_headers([("Sec-Ch-Ua-Platform", "\"Linux\"")]);
        let proposals = hints.proposals();
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].field, Field::OperatingSystemName);
        assert_eq!(proposals[0].value, "Linux");
    }

    #[test]
    fn brand_list_skips_greasy_sentinel() {
        let list = "\"Not.A/Brand\";v=\"8\", \"Chromium\";v=\"120\"";
        assert_eq!(
            first_real_brand(list),
            Some(("Chromium".to_string(), "120".to_string()))
        );
    }

    #[test]
    fn cache_key_is_sorted_and_stable() {
        let a = ClientHints::from_headers([("Sec-Ch-Ua-Platform", "Linux"), ("User-Agent", "ua")]);
        let b = ClientHints::from_headers([("User-Agent", "ua"), ("Sec-Ch-Ua-Platform", "Linux")]);
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn cache_key_ignores_unrecognized_headers() {
        let known = ClientHints::from_headers([("Sec-Ch-Ua-Platform", "Linux")]);
        let with_noise =
            ClientHints::from_headers([("Sec-Ch-Ua-Platform", "Linux"), ("X-Forwarded-For", "1.2.3.4")]);
        assert_eq!(known.cache_key(), with_noise.cache_key());
    }

    #[test]
    fn arch_header_becomes_device_cpu_proposal() {
        let hints = ClientHints::from_headers([("Sec-Ch-Ua-Arch", "\"x86\"")]);
        let proposals = hints.proposals();
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].field, Field::DeviceCpu);
        assert_eq!(proposals[0].value, "x86");
    }

    #[test]
    fn wow64_overrides_arch_with_higher_confidence() {
        let hints = ClientHints::from_headers([("Sec-Ch-Ua-Arch", "\"x86\""), ("Sec-Ch-Ua-Wow64", "?1")]);
        let proposals = hints.proposals();
        let cpu: Vec<_> = proposals.iter().filter(|p| p.field == Field::DeviceCpu).collect();
        assert_eq!(cpu.len(), 2);
        let winner = cpu.iter().max_by_key(|p| p.confidence).unwrap();
        assert_eq!(winner.value, "amd64");
    }
}
