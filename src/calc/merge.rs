use crate::calc::Candidate;

/// Merge two lists already sorted by ascending time. On equal times the entry from `a` comes first.
pub fn merge_sorted(a: Vec<Candidate>, b: Vec<Candidate>) -> Vec<Candidate> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let mut left = a.into_iter().peekable();
    let mut right = b.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let next = if l.time <= r.time {
            left.next()
        } else {
            right.next()
        };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}
