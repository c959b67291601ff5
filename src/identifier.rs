//! Deterministic physical-id generation for log groups created without an
//! explicit name.
//!
//! The generated name is `<prefix>-<12 random alphanumeric chars>`, with the
//! random suffix seeded from the client request token: retried create
//! invocations carry the same token and therefore regenerate the same name,
//! which is what makes an interrupted create safely resumable.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Length of the random suffix appended to the prefix.
const GENERATED_SUFFIX_LENGTH: usize = 12;

/// Build a resource identifier from a naming prefix and an idempotency
/// token, truncated to `max_length`.
///
/// When the prefix does not fit, its tail is kept — the trailing characters
/// of a logical resource id are the ones users disambiguate by.
pub fn generate_resource_identifier(
    prefix: &str,
    client_request_token: &str,
    max_length: usize,
) -> String {
    let suffix = token_suffix(client_request_token);
    if max_length <= GENERATED_SUFFIX_LENGTH {
        return suffix.chars().take(max_length).collect();
    }

    let prefix_budget = max_length - GENERATED_SUFFIX_LENGTH - 1;
    let prefix_len = prefix.chars().count();
    let head: String = if prefix_len > prefix_budget {
        prefix.chars().skip(prefix_len - prefix_budget).collect()
    } else {
        prefix.to_string()
    };

    format!("{head}-{suffix}")
}

fn token_suffix(client_request_token: &str) -> String {
    let mut hasher = DefaultHasher::new();
    client_request_token.hash(&mut hasher);
    let rng = StdRng::seed_from_u64(hasher.finish());
    rng.sample_iter(Alphanumeric)
        .take(GENERATED_SUFFIX_LENGTH)
        .map(char::from)
        .collect()
}
