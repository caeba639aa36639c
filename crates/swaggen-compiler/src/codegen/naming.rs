//! Identifier normalization for generated code.
//!
//! Wire keys are snake_case and model names arrive in whatever casing the
//! IDL author used; both normalize through the same segment rules so the
//! whole graph gets one consistent convention. Acronym segments capitalize
//! as a unit (`ip_addr` -> `IPAddr`, `DnsPolicy` -> `DNSPolicy`) — the rule
//! table below is the single source of truth for that.

/// Segments that render fully capitalized in generated identifiers.
/// Kept sorted for readability; matching is by lowercased segment.
const ACRONYMS: &[&str] = &[
    "api", "crl", "dns", "gslb", "hsm", "http", "https", "icap", "icmp", "id", "ip", "ipam", "jwt",
    "nat", "ntp", "oauth", "ocsp", "saml", "snmp", "ssh", "ssl", "tcp", "tls", "udp", "uri", "url",
    "uuid", "vip", "vlan", "vrf", "waf", "xss",
];

/// Normalizes a wire key or model name to an exported identifier.
pub fn exported_ident(name: &str) -> String {
    segments(name)
        .iter()
        .map(|seg| cased_segment(seg))
        .collect()
}

/// Normalizes a model name to a snake_case file stem.
pub fn file_stem(name: &str) -> String {
    segments(name)
        .iter()
        .map(|seg| seg.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Lowercased, space-joined segments for doc-comment text
/// (`VirtualService` -> "virtual service").
pub fn humanize(name: &str) -> String {
    segments(name)
        .iter()
        .map(|seg| seg.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

fn cased_segment(segment: &str) -> String {
    let lower = segment.to_lowercase();
    if ACRONYMS.contains(&lower.as_str()) {
        return segment.to_uppercase();
    }

    let mut chars = lower.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Splits on `_`/`-` and on camel-case boundaries. An uppercase run ending
/// before a lowercase letter splits so "IPAddr" yields ["IP", "Addr"].
fn segments(name: &str) -> Vec<String> {
    let mut out = Vec::new();

    for chunk in name.split(|c| c == '_' || c == '-') {
        if chunk.is_empty() {
            continue;
        }

        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let boundary = (chars[i].is_uppercase() && chars[i - 1].is_lowercase())
                || (chars[i].is_uppercase()
                    && i + 1 < chars.len()
                    && chars[i + 1].is_lowercase()
                    && chars[i - 1].is_uppercase());
            if boundary {
                out.push(chars[start..i].iter().collect());
                start = i;
            }
        }
        out.push(chars[start..].iter().collect());
    }

    out
}
