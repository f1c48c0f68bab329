use std::collections::HashSet;

use rand::Rng;
use webcorpus_types::DocId;

const MAX_ATTEMPTS: u32 = 1000;

/// Assign a document-id for `path`: the filename stem plus a random
/// 4-digit suffix, retried on collision up to [`MAX_ATTEMPTS`] times and
/// falling back to a zero-padded monotonic counter if every attempt
/// collides.
pub fn assign_doc_id(path: &str, used: &mut HashSet<String>, fallback_counter: &mut u32) -> DocId {
    let stem = filename_stem(path);

    let mut rng = rand::thread_rng();
    for _ in 0..MAX_ATTEMPTS {
        let suffix: u32 = rng.gen_range(1000..=9999);
        let candidate = format!("{stem}{suffix}");
        if used.insert(candidate.clone()) {
            return DocId::new(candidate);
        }
    }

    loop {
        let candidate = format!("{stem}{:04}", fallback_counter);
        *fallback_counter += 1;
        if used.insert(candidate.clone()) {
            return DocId::new(candidate);
        }
    }
}

fn filename_stem(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => name.to_string(),
        Some(idx) => name[..idx].to_string(),
    }
}
