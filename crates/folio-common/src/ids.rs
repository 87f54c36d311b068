use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ISSUED: AtomicI64 = AtomicI64::new(0);

/// Timestamp-derived record id (epoch milliseconds) distinct from every id in `taken`.
///
/// Ids issued by this process are strictly increasing, so two adds within the same
/// millisecond still differ.
pub fn new_record_id<'a>(taken: impl IntoIterator<Item = &'a str>) -> String {
    let taken: HashSet<&str> = taken.into_iter().collect();
    let now = chrono::Utc::now().timestamp_millis();
    let mut candidate = LAST_ISSUED
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .map(|last| now.max(last + 1))
        .unwrap_or(now);

    while taken.contains(candidate.to_string().as_str()) {
        candidate += 1;
    }
    LAST_ISSUED.fetch_max(candidate, Ordering::SeqCst);
    candidate.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_numeric_and_increasing() {
        let a: i64 = new_record_id([]).parse().unwrap();
        let b: i64 = new_record_id([]).parse().unwrap();
        assert!(b > a);
    }

    #[test]
    fn skips_taken_ids() {
        let next: i64 = new_record_id([]).parse().unwrap();
        let taken: Vec<String> = (next + 1..next + 50).map(|n| n.to_string()).collect();
        let id = new_record_id(taken.iter().map(String::as_str));
        assert!(!taken.contains(&id));
    }
}
